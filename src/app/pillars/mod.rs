pub mod competition;
pub mod infrastructure;
pub mod macro_risk;
pub mod socio_economic;
pub mod traffic;

#[cfg(test)]
pub(crate) mod testing;

pub use competition::CompetitionPillar;
pub use infrastructure::InfrastructurePillar;
pub use macro_risk::MacroRiskPillar;
pub use socio_economic::SocioEconomicPillar;
pub use traffic::TrafficPillar;

use crate::core::engine::PillarSet;
use crate::domain::ports::{DemographicSource, PlaceSearch, PlanningRiskSource};
use crate::utils::error::Result;

/// Wires the five standard evaluators; the place search is shared by A, B and D.
pub fn standard_pillars<P, D, R>(places: P, demographics: D, planning: R) -> Result<PillarSet>
where
    P: PlaceSearch + Clone + 'static,
    D: DemographicSource + 'static,
    R: PlanningRiskSource + 'static,
{
    PillarSet::new(
        Box::new(CompetitionPillar::new(places.clone())),
        Box::new(TrafficPillar::new(places.clone())),
        Box::new(SocioEconomicPillar::new(demographics)),
        Box::new(InfrastructurePillar::new(places)),
        Box::new(MacroRiskPillar::new(planning)),
    )
}
