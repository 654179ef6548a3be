//! Signal source blocks

use rootlocus_types::Reference;

use crate::block::Block;

/// Step signal following a [`Reference`]: 0 before the step time, the set
/// point from then on
#[derive(Debug, Clone)]
pub struct Step {
    output: f64,
    reference: Reference,
}

impl Step {
    pub fn new(reference: Reference) -> Self {
        Self {
            output: reference.value_at(0.0),
            reference,
        }
    }

    pub fn reference(&self) -> &Reference {
        &self.reference
    }
}

impl From<Reference> for Step {
    fn from(reference: Reference) -> Self {
        Self::new(reference)
    }
}

impl Block for Step {
    fn inputs(&self) -> &[f64] {
        &[]
    }

    fn inputs_mut(&mut self) -> &mut [f64] {
        &mut []
    }

    fn outputs(&self) -> &[f64] {
        std::slice::from_ref(&self.output)
    }

    fn update(&mut self, t: f64) {
        self.output = self.reference.value_at(t);
    }

    fn reset(&mut self) {
        self.output = self.reference.value_at(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_switches_at_step_time() {
        let mut step = Step::new(Reference::new(2.5, 1.0));
        step.update(0.5);
        assert_eq!(step.get_output(0), 0.0);
        step.update(1.0);
        assert_eq!(step.get_output(0), 2.5);
        step.reset();
        assert_eq!(step.get_output(0), 0.0);
    }

    #[test]
    fn test_step_from_reference() {
        let mut step = Step::from(Reference::new(3.0, 0.0));
        assert_eq!(step.get_output(0), 3.0);
        step.update(0.0);
        assert_eq!(step.get_output(0), 3.0);
        assert_eq!(step.reference().step_time, 0.0);
    }
}
