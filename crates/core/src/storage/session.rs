use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::CoreError;
use crate::models::portfolio::PortfolioSnapshot;

/// Shape of the stored session blob: `{ "investments": { ... } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionData {
    pub investments: PortfolioSnapshot,
}

/// Reads and writes session blobs handed over by the storage collaborator.
pub struct SessionCodec;

impl SessionCodec {
    /// Parse a stored session blob.
    ///
    /// Never fails: a missing, unparseable or wrong-shaped blob yields an
    /// empty session. Holding values are recomputed from quantity × price.
    pub fn decode(raw: Option<&str>) -> SessionData {
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return SessionData::default();
        };
        match Self::try_decode(raw) {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Malformed session data, starting from an empty portfolio");
                SessionData::default()
            }
        }
    }

    /// Strict variant of [`SessionCodec::decode`] that reports the parse error.
    pub fn try_decode(raw: &str) -> Result<SessionData, CoreError> {
        let mut session: SessionData = serde_json::from_str(raw)?;
        for holding in &mut session.investments.holdings {
            holding.recompute_value();
        }
        Ok(session)
    }

    /// Serialize a session for write-back.
    pub fn encode(session: &SessionData) -> Result<String, CoreError> {
        serde_json::to_string(session)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize session: {e}")))
    }
}
