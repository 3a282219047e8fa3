//! Items embedded in a report

use pt_models::{Kpi, Milestone, Objective, Report, ReportStatus};
use uuid::Uuid;

/// An item stored inside a report's sub-collection.
///
/// Item ids are UUIDs, unique within the owning report.
pub trait ReportItem: Clone + Send + Sync + 'static {
    /// Type name used in not-found errors
    const NAME: &'static str;

    fn item_id(&self) -> Option<Uuid>;
    fn set_item_id(&mut self, id: Uuid);
    fn items(report: &Report) -> &[Self];
    fn items_mut(report: &mut Report) -> &mut Vec<Self>;
}

impl ReportItem for Milestone {
    const NAME: &'static str = "Milestone";

    fn item_id(&self) -> Option<Uuid> {
        self.id
    }

    fn set_item_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }

    fn items(report: &Report) -> &[Self] {
        &report.milestones
    }

    fn items_mut(report: &mut Report) -> &mut Vec<Self> {
        &mut report.milestones
    }
}

impl ReportItem for Objective {
    const NAME: &'static str = "Objective";

    fn item_id(&self) -> Option<Uuid> {
        self.id
    }

    fn set_item_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }

    fn items(report: &Report) -> &[Self] {
        &report.objectives
    }

    fn items_mut(report: &mut Report) -> &mut Vec<Self> {
        &mut report.objectives
    }
}

impl ReportItem for ReportStatus {
    const NAME: &'static str = "ReportStatus";

    fn item_id(&self) -> Option<Uuid> {
        self.id
    }

    fn set_item_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }

    fn items(report: &Report) -> &[Self] {
        &report.statuses
    }

    fn items_mut(report: &mut Report) -> &mut Vec<Self> {
        &mut report.statuses
    }
}

impl ReportItem for Kpi {
    const NAME: &'static str = "Kpi";

    fn item_id(&self) -> Option<Uuid> {
        self.id
    }

    fn set_item_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }

    fn items(report: &Report) -> &[Self] {
        &report.kpis
    }

    fn items_mut(report: &mut Report) -> &mut Vec<Self> {
        &mut report.kpis
    }
}

/// A fresh id not used by any item of the same kind in `report`
pub fn fresh_item_id<T: ReportItem>(report: &Report) -> Uuid {
    loop {
        let id = Uuid::new_v4();
        if T::items(report).iter().all(|item| item.item_id() != Some(id)) {
            return id;
        }
    }
}

/// Position of the item with `id`
pub fn position<T: ReportItem>(report: &Report, id: Uuid) -> Option<usize> {
    T::items(report).iter().position(|item| item.item_id() == Some(id))
}

fn assign_missing<T: ReportItem>(report: &mut Report) {
    let missing: Vec<usize> = T::items(report)
        .iter()
        .enumerate()
        .filter(|(_, item)| item.item_id().is_none())
        .map(|(index, _)| index)
        .collect();

    for index in missing {
        let id = fresh_item_id::<T>(report);
        T::items_mut(report)[index].set_item_id(id);
    }
}

/// Give every embedded item without an id a fresh one
pub fn assign_item_ids(report: &mut Report) {
    assign_missing::<Milestone>(report);
    assign_missing::<Objective>(report);
    assign_missing::<ReportStatus>(report);
    assign_missing::<Kpi>(report);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pt_models::{Quarter, ReportDraft, ReportState, StatusType};

    #[test]
    fn test_assign_item_ids_keeps_existing() {
        let existing = Uuid::new_v4();
        let mut kept = Milestone::new("Alpha");
        kept.id = Some(existing);

        let mut report = ReportDraft {
            project_id: 1,
            year: 2023,
            quarter: Quarter::Q1,
            state: ReportState::Draft,
            phase: String::new(),
            progress: 0,
            estimated_end: None,
            finance: None,
            milestones: vec![kept, Milestone::new("Beta")],
            objectives: Vec::new(),
            statuses: StatusType::ALL.iter().copied().map(ReportStatus::baseline).collect(),
            kpis: vec![Kpi {
                name: "Online applications".into(),
                ..Default::default()
            }],
        }
        .into_report();

        assign_item_ids(&mut report);

        assert_eq!(report.milestones[0].id, Some(existing));
        assert!(report.milestones[1].id.is_some());
        assert!(report.statuses.iter().all(|entry| entry.id.is_some()));
        assert!(report.kpis[0].id.is_some());
        assert_eq!(position::<Milestone>(&report, existing), Some(0));
    }
}
