/// Trait for life-like cellular automaton rules.
///
/// A rule is the opaque kernel strategy of the simulation: the scheduler
/// never looks inside it. On the GPU it is compiled into a fragment shader,
/// on the CPU `evolve` is called per cell.
pub trait Rule: Send + Sync {
    /// Name of the rule
    fn name(&self) -> &'static str;

    /// Short description
    fn description(&self) -> &'static str;

    /// Neighbor counts at which a dead cell is born
    fn birth(&self) -> &'static [u8];

    /// Neighbor counts at which a live cell survives
    fn survival(&self) -> &'static [u8];

    /// Apply rule to compute next cell state
    fn evolve(&self, alive: bool, neighbors: u8) -> bool {
        if alive {
            self.survival().contains(&neighbors)
        } else {
            self.birth().contains(&neighbors)
        }
    }

    /// Rule in B/S notation, e.g. "B3/S23"
    fn notation(&self) -> String {
        let digits = |counts: &[u8]| counts.iter().map(|n| n.to_string()).collect::<String>();
        format!("B{}/S{}", digits(self.birth()), digits(self.survival()))
    }
}

/// Conway's Game of Life (B3/S23)
#[derive(Clone, Copy)]
pub struct ConwayRule;

impl Rule for ConwayRule {
    fn name(&self) -> &'static str {
        "Conway"
    }

    fn description(&self) -> &'static str {
        "B3/S23 - Classic"
    }

    fn birth(&self) -> &'static [u8] {
        &[3]
    }

    fn survival(&self) -> &'static [u8] {
        &[2, 3]
    }
}

/// HighLife (B36/S23)
/// Like Conway's Life but cells with 6 neighbors are born
#[derive(Clone, Copy)]
pub struct HighLifeRule;

impl Rule for HighLifeRule {
    fn name(&self) -> &'static str {
        "HighLife"
    }

    fn description(&self) -> &'static str {
        "B36/S23 - Replicators"
    }

    fn birth(&self) -> &'static [u8] {
        &[3, 6]
    }

    fn survival(&self) -> &'static [u8] {
        &[2, 3]
    }
}

/// Seeds (B2/S)
/// Every live cell dies each generation
#[derive(Clone, Copy)]
pub struct SeedsRule;

impl Rule for SeedsRule {
    fn name(&self) -> &'static str {
        "Seeds"
    }

    fn description(&self) -> &'static str {
        "B2/S - Exploding"
    }

    fn birth(&self) -> &'static [u8] {
        &[2]
    }

    fn survival(&self) -> &'static [u8] {
        &[]
    }
}

/// Day & Night (B3678/S34678)
#[derive(Clone, Copy)]
pub struct DayAndNightRule;

impl Rule for DayAndNightRule {
    fn name(&self) -> &'static str {
        "Day&Night"
    }

    fn description(&self) -> &'static str {
        "B3678/S34678"
    }

    fn birth(&self) -> &'static [u8] {
        &[3, 6, 7, 8]
    }

    fn survival(&self) -> &'static [u8] {
        &[3, 4, 6, 7, 8]
    }
}

/// Get all available rules
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(ConwayRule),
        Box::new(HighLifeRule),
        Box::new(SeedsRule),
        Box::new(DayAndNightRule),
    ]
}

/// Look up a rule by name, ignoring case
pub fn rule_by_name(name: &str) -> Option<Box<dyn Rule>> {
    all_rules()
        .into_iter()
        .find(|rule| rule.name().eq_ignore_ascii_case(name))
}

/// Get default rule (Conway's Life)
pub fn default_rule() -> Box<dyn Rule> {
    Box::new(ConwayRule)
}
