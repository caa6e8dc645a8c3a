//! Profile screen node settings.
//!
//! Four feature toggles, all on by default. Session-scoped: the original
//! shell never persisted them.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeSetting {
    HolographicSynthesis,
    EthicalForesight,
    NetworkSharing,
    AdaptiveLearning,
}

impl NodeSetting {
    pub const ALL: [NodeSetting; 4] = [
        NodeSetting::HolographicSynthesis,
        NodeSetting::EthicalForesight,
        NodeSetting::NetworkSharing,
        NodeSetting::AdaptiveLearning,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            NodeSetting::HolographicSynthesis => "Holographic Synthesis",
            NodeSetting::EthicalForesight => "Ethical Foresight",
            NodeSetting::NetworkSharing => "Network Sharing",
            NodeSetting::AdaptiveLearning => "Adaptive Learning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeSettings {
    holographic_synthesis: bool,
    ethical_foresight: bool,
    network_sharing: bool,
    adaptive_learning: bool,
}

impl NodeSettings {
    #[must_use]
    pub fn is_enabled(&self, setting: NodeSetting) -> bool {
        match setting {
            NodeSetting::HolographicSynthesis => self.holographic_synthesis,
            NodeSetting::EthicalForesight => self.ethical_foresight,
            NodeSetting::NetworkSharing => self.network_sharing,
            NodeSetting::AdaptiveLearning => self.adaptive_learning,
        }
    }

    pub fn toggle(&mut self, setting: NodeSetting) {
        let flag = match setting {
            NodeSetting::HolographicSynthesis => &mut self.holographic_synthesis,
            NodeSetting::EthicalForesight => &mut self.ethical_foresight,
            NodeSetting::NetworkSharing => &mut self.network_sharing,
            NodeSetting::AdaptiveLearning => &mut self.adaptive_learning,
        };
        *flag = !*flag;
    }
}

impl Default for NodeSettings {
    fn default() -> Self {
        Self {
            holographic_synthesis: true,
            ethical_foresight: true,
            network_sharing: true,
            adaptive_learning: true,
        }
    }
}
