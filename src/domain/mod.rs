mod texel;
mod texel_grid;
mod rules;
mod edit;
mod clock;
mod buffer_pair;
mod coords;

pub use texel::Texel;
pub use texel_grid::TexelGrid;
pub use rules::{Rule, ConwayRule, HighLifeRule, SeedsRule, DayAndNightRule, all_rules, rule_by_name, default_rule};
pub use edit::{Edit, EditKind, EditQueue, EditTarget, Brush, Footprint};
pub use clock::TickClock;
pub use buffer_pair::{BufferPair, Role};
pub use coords::screen_to_grid;
