//! Per-feature defect catalog
//!
//! Fixture defects for four known features, keyed by Kissflow feature id and
//! reachable from their `KFF-` item ids. This lookup is separate from the
//! primary fetch path: the mock provider there always answers with its own
//! Flow Lock defects.

use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use qsr_model::{Defect, DefectStatus, Priority, Severity};
use serde::Serialize;
use std::collections::HashMap;

pub const FLOW_LOCK_FEATURE: &str = "67309a1b2c3d4e5f60718293";
pub const FM_LOGISTICS_FEATURE: &str = "67309a1b2c3d4e5f60718294";
pub const USER_DASHBOARD_FEATURE: &str = "67309a1b2c3d4e5f60718295";
pub const API_AUTH_FEATURE: &str = "67309a1b2c3d4e5f60718296";

/// Feature id for a Kissflow item id; unknown items resolve to Flow Lock
#[must_use]
pub fn feature_for_item(item_id: &str) -> &'static str {
    match item_id {
        "KFF-0219" => FM_LOGISTICS_FEATURE,
        "KFF-0001" => USER_DASHBOARD_FEATURE,
        "KFF-0123" => API_AUTH_FEATURE,
        _ => FLOW_LOCK_FEATURE,
    }
}

/// Defect counts for one feature
///
/// Every status, severity and priority bucket is present, zero-filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefectSummary {
    pub total: usize,
    pub by_status: IndexMap<DefectStatus, usize>,
    pub by_severity: IndexMap<Severity, usize>,
    pub by_priority: IndexMap<Priority, usize>,
    /// Closed plus resolved
    pub fixed: usize,
    pub open: usize,
}

impl DefectSummary {
    /// Tally a set of defects
    #[must_use]
    pub fn from_defects(defects: &[Defect]) -> Self {
        let mut by_status: IndexMap<_, _> = DefectStatus::ALL.into_iter().map(|s| (s, 0)).collect();
        let mut by_severity: IndexMap<_, _> = Severity::ALL.into_iter().map(|s| (s, 0)).collect();
        let mut by_priority: IndexMap<_, _> = Priority::ALL.into_iter().map(|p| (p, 0)).collect();

        for defect in defects {
            *by_status.entry(defect.status).or_insert(0) += 1;
            *by_severity.entry(defect.severity).or_insert(0) += 1;
            if let Some(priority) = defect.priority {
                *by_priority.entry(priority).or_insert(0) += 1;
            }
        }

        let total = defects.len();
        let fixed = defects.iter().filter(|d| d.status.is_fixed()).count();

        Self {
            total,
            by_status,
            by_severity,
            by_priority,
            fixed,
            open: total - fixed,
        }
    }
}

/// Read-only defect fixtures for the known features
#[derive(Debug, Clone)]
pub struct DefectCatalog {
    features: HashMap<&'static str, Vec<Defect>>,
}

impl DefectCatalog {
    /// Catalog with timestamps relative to now
    #[must_use]
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Catalog with timestamps relative to `base`
    #[must_use]
    pub fn at(base: DateTime<Utc>) -> Self {
        let clock = Clock { base };
        let features = HashMap::from([
            (FLOW_LOCK_FEATURE, flow_lock_defects(&clock)),
            (FM_LOGISTICS_FEATURE, fm_logistics_defects(&clock)),
            (USER_DASHBOARD_FEATURE, user_dashboard_defects(&clock)),
            (API_AUTH_FEATURE, api_auth_defects(&clock)),
        ]);
        Self { features }
    }

    /// All defects of a feature; empty for unknown features
    #[must_use]
    pub fn by_feature(&self, feature_id: &str) -> &[Defect] {
        self.features.get(feature_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All defects of the feature behind a Kissflow item id
    #[must_use]
    pub fn by_item_id(&self, item_id: &str) -> &[Defect] {
        self.by_feature(feature_for_item(item_id))
    }

    /// Defects found in one test cycle
    #[must_use]
    pub fn by_cycle(&self, feature_id: &str, cycle: u32) -> Vec<Defect> {
        self.by_feature(feature_id)
            .iter()
            .filter(|d| d.cycle == Some(cycle))
            .cloned()
            .collect()
    }

    /// Summary statistics of a feature
    #[must_use]
    pub fn summary(&self, feature_id: &str) -> DefectSummary {
        DefectSummary::from_defects(self.by_feature(feature_id))
    }
}

impl Default for DefectCatalog {
    fn default() -> Self {
        Self::new()
    }
}

struct Clock {
    base: DateTime<Utc>,
}

impl Clock {
    fn days_ago(&self, days: i64) -> String {
        (self.base - Duration::days(days))
            .format("%Y-%m-%dT%H:%M:%S%.6fZ")
            .to_string()
    }

    /// Created/updated stamps, with the update doubling as resolution when fixed
    fn stamped(&self, defect: Defect, created: i64, updated: i64) -> Defect {
        let resolved = defect.status.is_fixed().then(|| self.days_ago(updated));
        defect.with_timestamps(self.days_ago(created), self.days_ago(updated), resolved)
    }
}

fn flow_lock_defects(clock: &Clock) -> Vec<Defect> {
    vec![
        clock.stamped(
            Defect::new("FL-001", DefectStatus::Closed, Severity::High)
                .with_summary(
                    "Flow lock not acquired when multiple users edit simultaneously",
                    "When two users try to edit the same flow at the same time, both are able to access edit mode without proper locking mechanism",
                )
                .with_priority(Priority::P1)
                .with_assignment("Roshini R S", "Sankaran Baskaran")
                .found_in("TC-FL-001", 1, "TST")
                .with_reproduction(
                    "1. Open flow in two browser tabs\n2. Start editing in both tabs\n3. Make changes simultaneously\n4. Save in both tabs",
                    "Second user should be blocked with 'Flow is being edited' message",
                    "Both users can edit and save, causing data conflicts",
                ),
            45,
            40,
        ),
        clock.stamped(
            Defect::new("FL-002", DefectStatus::Closed, Severity::Medium)
                .with_summary(
                    "Lock indicator not visible in dark mode",
                    "The flow lock indicator UI is not visible when using dark theme, making users unaware of lock status",
                )
                .with_priority(Priority::P2)
                .with_assignment("Rashmi Subramani", "Sankaran Baskaran")
                .found_in("TC-FL-012", 1, "Pesagi")
                .with_reproduction(
                    "1. Switch to dark mode\n2. Open a flow being edited by another user\n3. Check for lock indicator",
                    "Lock indicator should be clearly visible with appropriate contrast",
                    "Lock indicator blends with dark background and is not visible",
                ),
            42,
            35,
        ),
        clock.stamped(
            Defect::new("FL-003", DefectStatus::Closed, Severity::Medium)
                .with_summary(
                    "Lock timeout not working correctly",
                    "Flow locks are not automatically released after the configured timeout period",
                )
                .with_priority(Priority::P2)
                .with_assignment("Roshini R S", "Sankaran Baskaran")
                .found_in("TC-FL-008", 1, "TST")
                .with_reproduction(
                    "1. Start editing a flow\n2. Leave browser idle for 30 minutes\n3. Try to edit from another user",
                    "Lock should be automatically released after 30 minutes",
                    "Lock persists indefinitely until browser is closed",
                ),
            40,
            32,
        ),
        clock.stamped(
            Defect::new("FL-004", DefectStatus::Open, Severity::High)
                .with_summary(
                    "Lock not released on browser crash",
                    "When browser crashes while editing, the flow lock is not automatically released",
                )
                .with_priority(Priority::P1)
                .with_assignment("Roshini R S", "Sankaran Baskaran")
                .found_in("TC-FL-015", 2, "TST")
                .with_reproduction(
                    "1. Start editing a flow\n2. Force close browser or kill browser process\n3. Try to edit from another user/browser",
                    "Lock should be released after detecting browser disconnect",
                    "Lock remains active, blocking all other users from editing",
                ),
            15,
            10,
        ),
        clock.stamped(
            Defect::new("FL-005", DefectStatus::Open, Severity::Low)
                .with_summary(
                    "Minor UI alignment issue in lock popup",
                    "Lock notification popup has minor text alignment issues on mobile devices",
                )
                .with_priority(Priority::P3)
                .with_assignment("Rashmi Subramani", "Sankaran Baskaran")
                .found_in("TC-FL-020", 3, "Pesagi")
                .with_reproduction(
                    "1. Access flow on mobile browser\n2. Try to edit locked flow\n3. Observe popup layout",
                    "Popup text should be properly aligned and readable",
                    "Text appears slightly misaligned on smaller screens",
                ),
            8,
            5,
        ),
    ]
}

fn fm_logistics_defects(clock: &Clock) -> Vec<Defect> {
    vec![
        clock.stamped(
            Defect::new("FML-001", DefectStatus::Closed, Severity::Critical)
                .with_summary(
                    "Email notifications not sent for logistics updates",
                    "Email notifications for logistics process updates are not being delivered to stakeholders",
                )
                .with_priority(Priority::P1)
                .with_assignment("Backend Team", "QA Team")
                .found_in("TC-FML-003", 1, "Draco")
                .with_reproduction(
                    "1. Submit logistics request\n2. Approve request\n3. Check email notifications",
                    "Stakeholders should receive email notifications for status changes",
                    "No email notifications are sent",
                ),
            50,
            45,
        ),
        clock.stamped(
            Defect::new("FML-002", DefectStatus::InProgress, Severity::High)
                .with_summary(
                    "Bounce issue in notification delivery",
                    "Notification delivery fails with bounce errors for certain email domains",
                )
                .with_priority(Priority::P1)
                .with_assignment("Infrastructure Team", "QA Team")
                .found_in("TC-FML-007", 2, "Draco")
                .with_reproduction(
                    "1. Set recipient with external domain email\n2. Trigger notification\n3. Check delivery status",
                    "Notifications should be delivered successfully to all domains",
                    "Delivery fails with bounce errors for some external domains",
                ),
            35,
            5,
        ),
        clock.stamped(
            Defect::new("FML-003", DefectStatus::Open, Severity::Medium)
                .with_summary(
                    "SMS notification formatting issues",
                    "SMS notifications contain unformatted HTML content and are not user-friendly",
                )
                .with_priority(Priority::P2)
                .with_assignment("Backend Team", "QA Team")
                .found_in("TC-FML-012", 3, "TST")
                .with_reproduction(
                    "1. Enable SMS notifications\n2. Trigger logistics update\n3. Check received SMS content",
                    "SMS should contain plain text, properly formatted content",
                    "SMS contains HTML tags and is difficult to read",
                ),
            20,
            15,
        ),
    ]
}

fn user_dashboard_defects(clock: &Clock) -> Vec<Defect> {
    vec![
        clock.stamped(
            Defect::new("UD-001", DefectStatus::Closed, Severity::Medium)
                .with_summary(
                    "Widget drag and drop not working in Safari",
                    "Dashboard widgets cannot be rearranged using drag and drop functionality in Safari browser",
                )
                .with_priority(Priority::P2)
                .with_assignment("Frontend Team", "QA Team")
                .found_in("TC-UD-005", 1, "Pesagi")
                .with_reproduction(
                    "1. Open dashboard in Safari\n2. Try to drag a widget to new position\n3. Observe behavior",
                    "Widget should move smoothly to new position",
                    "Widget does not respond to drag operations",
                ),
            30,
            25,
        ),
        clock.stamped(
            Defect::new("UD-002", DefectStatus::Open, Severity::High)
                .with_summary(
                    "Custom widget configuration not saved",
                    "Custom widget settings are lost after page refresh or browser restart",
                )
                .with_priority(Priority::P1)
                .with_assignment("Frontend Team", "QA Team")
                .found_in("TC-UD-015", 2, "TST")
                .with_reproduction(
                    "1. Customize widget settings\n2. Save configuration\n3. Refresh page or restart browser",
                    "Widget settings should persist after page reload",
                    "All customizations are lost and revert to defaults",
                ),
            12,
            8,
        ),
    ]
}

fn api_auth_defects(clock: &Clock) -> Vec<Defect> {
    vec![
        clock.stamped(
            Defect::new("API-001", DefectStatus::Closed, Severity::High)
                .with_summary(
                    "JWT token expiry not handled gracefully",
                    "Application does not handle JWT token expiration properly, causing unexpected logouts",
                )
                .with_priority(Priority::P1)
                .with_assignment("Backend Team", "Security Team")
                .found_in("TC-API-003", 1, "TST")
                .with_reproduction(
                    "1. Login with valid credentials\n2. Wait for token to expire\n3. Make API call",
                    "User should be redirected to login with proper error message",
                    "Application shows generic error without proper logout",
                ),
            60,
            55,
        ),
        clock.stamped(
            Defect::new("API-002", DefectStatus::InProgress, Severity::Medium)
                .with_summary(
                    "Rate limiting not enforced for public APIs",
                    "Public API endpoints do not enforce rate limiting, potentially allowing abuse",
                )
                .with_priority(Priority::P2)
                .with_assignment("Security Team", "Penetration Testing Team")
                .found_in("TC-API-008", 3, "Pesagi")
                .with_reproduction(
                    "1. Make rapid consecutive API calls to public endpoint\n2. Monitor response codes and timing",
                    "API should enforce rate limiting and return 429 status when exceeded",
                    "Unlimited requests are allowed without any rate limiting",
                ),
            25,
            10,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn catalog() -> DefectCatalog {
        DefectCatalog::at(Utc.with_ymd_and_hms(2025, 12, 1, 9, 30, 0).unwrap())
    }

    #[test]
    fn item_ids_resolve_to_features() {
        let catalog = catalog();
        assert_eq!(catalog.by_item_id("KFF-0111")[0].defect_id, "FL-001");
        assert_eq!(catalog.by_item_id("KFF-0219")[0].defect_id, "FML-001");
        assert_eq!(catalog.by_item_id("KFF-0001")[0].defect_id, "UD-001");
        assert_eq!(catalog.by_item_id("KFF-0123")[0].defect_id, "API-001");
    }

    #[test]
    fn unknown_item_falls_back_to_flow_lock() {
        let catalog = catalog();
        assert_eq!(catalog.by_item_id("KFF-7777"), catalog.by_feature(FLOW_LOCK_FEATURE));
    }

    #[test]
    fn unknown_feature_is_empty() {
        assert!(catalog().by_feature("nope").is_empty());
    }

    #[test]
    fn timestamps_are_relative_to_base() {
        let catalog = catalog();
        let fl001 = &catalog.by_feature(FLOW_LOCK_FEATURE)[0];
        assert_eq!(fl001.created_at.as_deref(), Some("2025-10-17T09:30:00.000000Z"));
        assert_eq!(fl001.updated_at.as_deref(), Some("2025-10-22T09:30:00.000000Z"));
        assert_eq!(fl001.resolved_at, fl001.updated_at);

        let fl004 = &catalog.by_feature(FLOW_LOCK_FEATURE)[3];
        assert_eq!(fl004.resolved_at, None);
    }

    #[test]
    fn flow_lock_summary() {
        let summary = catalog().summary(FLOW_LOCK_FEATURE);

        assert_eq!(summary.total, 5);
        assert_eq!(summary.by_status[&DefectStatus::Closed], 3);
        assert_eq!(summary.by_status[&DefectStatus::Open], 2);
        assert_eq!(summary.by_status[&DefectStatus::Resolved], 0);
        assert_eq!(summary.by_severity[&Severity::High], 2);
        assert_eq!(summary.by_severity[&Severity::Critical], 0);
        assert_eq!(summary.by_priority[&Priority::P1], 2);
        assert_eq!(summary.by_priority[&Priority::P4], 0);
        assert_eq!(summary.fixed, 3);
        assert_eq!(summary.open, 2);
    }

    #[test]
    fn summary_wire_shape() {
        let summary = catalog().summary(API_AUTH_FEATURE);
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["total"], 2);
        assert_eq!(json["byStatus"]["In Progress"], 1);
        assert_eq!(json["bySeverity"]["High"], 1);
        assert_eq!(json["byPriority"]["P2"], 1);
        assert_eq!(json["fixed"], 1);
        assert_eq!(json["open"], 1);
    }

    #[test]
    fn cycle_filter() {
        let catalog = catalog();
        let ids: Vec<_> = catalog
            .by_cycle(FLOW_LOCK_FEATURE, 1)
            .into_iter()
            .map(|d| d.defect_id)
            .collect();
        assert_eq!(ids, vec!["FL-001", "FL-002", "FL-003"]);
        assert!(catalog.by_cycle(USER_DASHBOARD_FEATURE, 3).is_empty());
    }

    #[test]
    fn empty_summary_has_all_buckets() {
        let summary = DefectSummary::from_defects(&[]);
        assert_eq!(summary.by_status.len(), 4);
        assert_eq!(summary.by_severity.len(), 4);
        assert_eq!(summary.by_priority.len(), 4);
        assert_eq!(summary.open, 0);
    }
}
