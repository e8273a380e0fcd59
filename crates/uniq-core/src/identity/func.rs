use std::fmt;

use uniq_model::{JobArgs, LockKey, LockTtl};

use crate::identity::LockIdentity;

type TtlFn = fn(&str, &JobArgs) -> LockTtl;

fn unbounded(_: &str, _: &JobArgs) -> LockTtl {
    LockTtl::Unbounded
}

/// Identity built from a pair of closures.
///
/// ```
/// use uniq_core::{FnIdentity, LockIdentity};
/// use uniq_model::{LockKey, LockTtl, job_args};
///
/// // One lock for every report, whatever the arguments, expiring after 5 minutes.
/// let id = FnIdentity::new(
///     |job_type: &str, _args: &uniq_model::JobArgs| LockKey::new(format!("lock:{job_type}")),
///     |_: &str, _: &uniq_model::JobArgs| LockTtl::seconds(300),
/// );
/// assert_eq!(id.lock_key("Report", &job_args![1]), id.lock_key("Report", &job_args![2]));
/// ```
pub struct FnIdentity<K, T = TtlFn> {
    key_fn: K,
    ttl_fn: T,
}

impl<K, T> FnIdentity<K, T>
where
    K: Fn(&str, &JobArgs) -> LockKey + Send + Sync,
    T: Fn(&str, &JobArgs) -> LockTtl + Send + Sync,
{
    /// Identity from a key function and a TTL function.
    pub fn new(key_fn: K, ttl_fn: T) -> Self {
        Self { key_fn, ttl_fn }
    }
}

impl<K> FnIdentity<K, TtlFn>
where
    K: Fn(&str, &JobArgs) -> LockKey + Send + Sync,
{
    /// Identity from a key function; locks never expire.
    pub fn keyed(key_fn: K) -> Self {
        Self {
            key_fn,
            ttl_fn: unbounded,
        }
    }
}

impl<K, T> LockIdentity for FnIdentity<K, T>
where
    K: Fn(&str, &JobArgs) -> LockKey + Send + Sync,
    T: Fn(&str, &JobArgs) -> LockTtl + Send + Sync,
{
    fn lock_key(&self, job_type: &str, args: &JobArgs) -> LockKey {
        (self.key_fn)(job_type, args)
    }

    fn lock_ttl(&self, job_type: &str, args: &JobArgs) -> LockTtl {
        (self.ttl_fn)(job_type, args)
    }
}

impl<K, T> fmt::Debug for FnIdentity<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnIdentity")
            .field("key_fn", &"<fn>")
            .field("ttl_fn", &"<fn>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uniq_model::job_args;

    #[test]
    fn keyed_uses_closure_and_unbounded_ttl() {
        let id = FnIdentity::keyed(|_: &str, _: &JobArgs| LockKey::new("global"));

        assert_eq!(id.lock_key("A", &job_args![1]), "global");
        assert_eq!(id.lock_key("B", &job_args![2]), "global");
        assert_eq!(id.lock_ttl("A", &job_args![1]), LockTtl::Unbounded);
    }

    #[test]
    fn ttl_can_depend_on_arguments() {
        let id = FnIdentity::new(
            |t: &str, a: &JobArgs| crate::default_lock_key("lock:", t, a),
            |_: &str, a: &JobArgs| match a.get(0).and_then(|v| v.as_u64()) {
                Some(n) if n > 100 => LockTtl::seconds(600),
                _ => LockTtl::seconds(60),
            },
        );

        let resolved = id.resolve("Import", &job_args![500]);
        assert_eq!(resolved.key, "lock:Import-[500]");
        assert_eq!(resolved.ttl, LockTtl::Seconds(600));
        assert_eq!(id.lock_ttl("Import", &job_args![5]), LockTtl::Seconds(60));
    }
}
