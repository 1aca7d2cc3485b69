use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::Outcome;
use crate::config::DesignerInput;
use crate::profile::Profile;

/// A named designer setup together with the ground it is applied to.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub name: String,
    pub designer: DesignerInput,
    pub xs: Profile,
}

pub struct ScenarioResult {
    pub name: String,
    pub outcome: Outcome,
    pub ms: f64,
}

/// Evaluate every scenario with its own merge mode. Scenarios share
/// nothing, so they run in parallel; results keep input order.
pub fn run_batch(scenarios: &[Scenario]) -> Vec<ScenarioResult> {
    scenarios
        .par_iter()
        .map(|s| {
            let (outcome, timings) = crate::apply(&s.designer, &s.xs, s.designer.mode);
            let ms = timings.last().map(|t| t.ms).unwrap_or_default();
            ScenarioResult {
                name: s.name.clone(),
                outcome,
                ms,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MergeMode;
    use crate::profile::Point;

    #[test]
    fn batch_matches_individual_runs_in_order() {
        let ground: Profile = (-40..=40).map(|s| Point::new(s as f64, 10.0)).collect();
        let mut wide = DesignerInput::default();
        wide.stage1.width = 30.0;
        let mut merged = DesignerInput::default();
        merged.mode = MergeMode::Merge;
        let mut broken = DesignerInput::default();
        broken.num_stages = 0;

        let scenarios: Vec<Scenario> = [("wide", wide), ("merged", merged), ("broken", broken)]
            .into_iter()
            .map(|(name, designer)| Scenario {
                name: name.into(),
                designer,
                xs: ground.clone(),
            })
            .collect();

        let results = run_batch(&scenarios);
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["wide", "merged", "broken"]);
        for (r, s) in results.iter().zip(&scenarios) {
            let (solo, _) = crate::apply(&s.designer, &s.xs, s.designer.mode);
            assert_eq!(r.outcome, solo);
        }
        assert!(results[0].outcome.is_ok());
        assert!(results[1].outcome.cross_section.len() > ground.len() - 30);
        assert!(!results[2].outcome.is_ok());
    }
}
