use chrono::Utc;
use sha2::{Digest, Sha512};

/// Time-boxed request signature.
///
/// The vendor expects `sign = hex(sha512(appId ‖ appSecret ‖ timeStamp))`, where the timestamp
/// is the Unix time in whole seconds, sent along in the `timeStamp` header.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub timestamp: String,
    pub sign: String,
}

impl Signature {
    pub fn now(app_id: &str, app_secret: &str) -> Self {
        Self::at(app_id, app_secret, Utc::now().timestamp())
    }

    pub fn at(app_id: &str, app_secret: &str, timestamp: i64) -> Self {
        let timestamp = timestamp.to_string();
        let digest = Sha512::new()
            .chain_update(app_id)
            .chain_update(app_secret)
            .chain_update(&timestamp)
            .finalize();
        Self { sign: format!("{digest:x}"), timestamp }
    }
}
