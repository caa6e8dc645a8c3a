//! Command-center dashboard data.
//!
//! The desktop dashboard renders a fixed snapshot; only the mobile tab
//! selection is live state.

/// Health badge shown next to a regional node cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeHealth {
    Optimal,
    Learning,
    Emerging,
}

impl NodeHealth {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            NodeHealth::Optimal => "optimal",
            NodeHealth::Learning => "learning",
            NodeHealth::Emerging => "emerging",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionStatus {
    pub name: &'static str,
    pub node_count: u32,
    pub health: NodeHealth,
}

/// The desktop command center's hard-coded overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandCenterSnapshot {
    pub active_echo_nodes: u32,
    pub global_sentience: u32,
    pub intent_synthesis: u32,
    pub ethical_alignment: u32,
    pub regions: [RegionStatus; 4],
}

impl CommandCenterSnapshot {
    #[must_use]
    pub const fn current() -> Self {
        Self {
            active_echo_nodes: 147,
            global_sentience: 73,
            intent_synthesis: 89,
            ethical_alignment: 95,
            regions: [
                RegionStatus {
                    name: "North America",
                    node_count: 42,
                    health: NodeHealth::Optimal,
                },
                RegionStatus {
                    name: "Europe",
                    node_count: 38,
                    health: NodeHealth::Optimal,
                },
                RegionStatus {
                    name: "Asia Pacific",
                    node_count: 45,
                    health: NodeHealth::Learning,
                },
                RegionStatus {
                    name: "South America",
                    node_count: 22,
                    health: NodeHealth::Emerging,
                },
            ],
        }
    }
}

/// Tabs of the mobile dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Network,
    Systems,
    Regions,
}

impl DashboardTab {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            DashboardTab::Network => "network",
            DashboardTab::Systems => "systems",
            DashboardTab::Regions => "regions",
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        match self {
            DashboardTab::Network => DashboardTab::Systems,
            DashboardTab::Systems => DashboardTab::Regions,
            DashboardTab::Regions => DashboardTab::Network,
        }
    }

    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            DashboardTab::Network => DashboardTab::Regions,
            DashboardTab::Systems => DashboardTab::Network,
            DashboardTab::Regions => DashboardTab::Systems,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_matches_the_fixed_overview() {
        let snapshot = CommandCenterSnapshot::current();

        assert_eq!(snapshot.active_echo_nodes, 147);
        assert_eq!(snapshot.global_sentience, 73);
        assert_eq!(snapshot.intent_synthesis, 89);
        assert_eq!(snapshot.ethical_alignment, 95);
        assert_eq!(snapshot.regions[0].name, "North America");
        assert_eq!(snapshot.regions[2].health, NodeHealth::Learning);
        assert_eq!(snapshot.regions[3].node_count, 22);
    }

    #[test]
    fn tab_cycling_is_a_closed_loop() {
        let mut tab = DashboardTab::default();
        assert_eq!(tab, DashboardTab::Network);

        tab = tab.next();
        assert_eq!(tab, DashboardTab::Systems);
        tab = tab.next();
        assert_eq!(tab, DashboardTab::Regions);
        tab = tab.next();
        assert_eq!(tab, DashboardTab::Network);

        assert_eq!(DashboardTab::Network.prev(), DashboardTab::Regions);
    }

    #[test]
    fn health_labels_match_badge_text() {
        assert_eq!(NodeHealth::Optimal.label(), "optimal");
        assert_eq!(NodeHealth::Learning.label(), "learning");
        assert_eq!(NodeHealth::Emerging.label(), "emerging");
    }
}
