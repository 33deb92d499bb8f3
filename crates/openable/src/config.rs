use serde::{Deserialize, Serialize};

/// Switches consulted by the interaction dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Require the use permission before handling any interaction.
    pub permissions_enabled: bool,
    /// Capture and restore fixtures mounted on concealing blocks.
    pub preserve_attachments: bool,
    pub enable_trapdoors: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            permissions_enabled: false,
            preserve_attachments: true,
            enable_trapdoors: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: DispatchConfig = serde_json::from_str(r#"{"enable_trapdoors": false}"#).unwrap();
        assert!(!cfg.enable_trapdoors);
        assert!(cfg.preserve_attachments);
        assert!(!cfg.permissions_enabled);
    }
}
