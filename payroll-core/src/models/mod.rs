mod regime_config;
mod scenario;
mod sweep_grid;
mod sweep_matrix;
mod tax_bracket;
mod tax_schedule;

pub use regime_config::{CorporateTaxRegime, PersonalTaxRegime, RegimeConfig, RegimeConfigError};
pub use scenario::{ScenarioInput, ScenarioResult};
pub use sweep_grid::{SweepGrid, SweepGridError};
pub use sweep_matrix::{ColorWeight, SweepCell, SweepMatrix, SweepRow, Tone};
pub use tax_bracket::TaxBracket;
pub use tax_schedule::{TaxSchedule, TaxScheduleError};
