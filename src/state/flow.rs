use crate::state::step::{FieldSpec, Step, StepStatus};

pub struct Flow {
    steps: Vec<Step>,
    current: usize,
    statuses: Vec<StepStatus>,
}

impl Flow {
    pub fn new(steps: Vec<Step>) -> Self {
        let statuses = initial_statuses(steps.len());
        Self {
            steps,
            current: 0,
            statuses,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step_at(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn status_at(&self, index: usize) -> StepStatus {
        self.statuses
            .get(index)
            .copied()
            .unwrap_or(StepStatus::Pending)
    }

    pub fn current_status(&self) -> StepStatus {
        self.status_at(self.current)
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.steps.len()
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    pub fn advance(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        if let Some(status) = self.statuses.get_mut(self.current) {
            *status = StepStatus::Done;
        }
        self.current += 1;
        if let Some(status) = self.statuses.get_mut(self.current) {
            *status = StepStatus::Active;
        }
        true
    }

    /// Moves back one step. The step being left returns to `Pending`.
    pub fn retreat(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        if let Some(status) = self.statuses.get_mut(self.current) {
            *status = StepStatus::Pending;
        }
        self.current -= 1;
        if let Some(status) = self.statuses.get_mut(self.current) {
            *status = StepStatus::Active;
        }
        true
    }

    pub fn reset(&mut self) {
        self.current = 0;
        self.statuses = initial_statuses(self.steps.len());
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.steps.get(self.current)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.steps.iter().flat_map(|step| step.fields.iter())
    }

    pub fn field(&self, id: &str) -> Option<&FieldSpec> {
        self.fields().find(|field| field.id == id)
    }

    pub fn step_of(&self, id: &str) -> Option<usize> {
        self.steps.iter().position(|step| step.has_field(id))
    }
}

fn initial_statuses(len: usize) -> Vec<StepStatus> {
    let mut statuses = vec![StepStatus::Pending; len];
    if let Some(first) = statuses.first_mut() {
        *first = StepStatus::Active;
    }
    statuses
}

#[cfg(test)]
mod tests {
    use super::Flow;
    use crate::state::step::{FieldSpec, Step, StepStatus};

    fn three_steps() -> Flow {
        Flow::new(vec![
            Step::builder("one", "One").field(FieldSpec::text("a", "A")).build(),
            Step::builder("two", "Two").field(FieldSpec::text("b", "B")).build(),
            Step::builder("three", "Three").field(FieldSpec::text("c", "C")).build(),
        ])
    }

    #[test]
    fn advance_and_retreat_track_statuses() {
        let mut flow = three_steps();
        assert_eq!(flow.current_status(), StepStatus::Active);

        assert!(flow.advance());
        assert_eq!(flow.current_index(), 1);
        assert_eq!(flow.status_at(0), StepStatus::Done);
        assert_eq!(flow.status_at(1), StepStatus::Active);

        assert!(flow.retreat());
        assert_eq!(flow.current_index(), 0);
        assert_eq!(flow.status_at(0), StepStatus::Active);
        assert_eq!(flow.status_at(1), StepStatus::Pending);
    }

    #[test]
    fn bounds_are_respected() {
        let mut flow = three_steps();
        assert!(!flow.retreat());
        assert_eq!(flow.current_index(), 0);

        assert!(flow.advance());
        assert!(flow.advance());
        assert!(flow.is_last());
        assert!(!flow.advance());
        assert_eq!(flow.current_index(), 2);

        flow.reset();
        assert_eq!(flow.current_index(), 0);
        assert_eq!(flow.status_at(2), StepStatus::Pending);
    }

    #[test]
    fn fields_are_located_by_step() {
        let flow = three_steps();
        assert_eq!(flow.step_of("b"), Some(1));
        assert_eq!(flow.step_of("z"), None);
        assert_eq!(flow.fields().count(), 3);
        assert!(flow.field("c").is_some());
    }
}
