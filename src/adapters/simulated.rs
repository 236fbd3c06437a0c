//! Deterministic stand-ins for demographic and zoning data feeds. Figures are
//! derived from the coordinates so repeated analyses of a point agree.

use crate::domain::model::{Industry, IndustryKind, Location};
use crate::domain::ports::{
    DemographicProfile, DemographicSource, PlanningOutlook, PlanningRiskSource,
};
use crate::utils::error::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedDemographics;

fn industry_multiplier(kind: IndustryKind) -> f64 {
    match kind {
        IndustryKind::FoodAndBeverage => 1.2,
        IndustryKind::Retail => 1.1,
        IndustryKind::Service => 1.0,
    }
}

impl SimulatedDemographics {
    pub fn profile_for(location: &Location, industry: &Industry) -> DemographicProfile {
        let urban = location.latitude.abs() + location.longitude.abs();

        DemographicProfile {
            customer_match: ((urban % 100.0) * industry_multiplier(industry.kind)).min(100.0),
            population_density: 1000.0 + (urban % 50.0) * 100.0,
            income_level: 30000.0
                + ((location.latitude * location.longitude).abs() % 50.0) * 1000.0,
        }
    }
}

impl DemographicSource for SimulatedDemographics {
    async fn profile(&self, location: &Location, industry: &Industry) -> Result<DemographicProfile> {
        Ok(Self::profile_for(location, industry))
    }

    fn is_simulated(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedPlanningRisk;

impl SimulatedPlanningRisk {
    pub fn outlook_for(location: &Location) -> PlanningOutlook {
        let (lat, lng) = (location.latitude, location.longitude);

        let factor = (lat * lng * 100.0).abs() % 100.0;
        let planning_risk = if factor > 80.0 {
            80.0
        } else if factor > 60.0 {
            50.0
        } else {
            20.0
        };

        PlanningOutlook {
            planning_risk,
            future_development: (((lat + lng).abs() * 10.0) % 100.0).max(40.0),
            economic_outlook: (((lat - lng).abs() * 15.0) % 100.0).max(50.0),
        }
    }
}

impl PlanningRiskSource for SimulatedPlanningRisk {
    async fn outlook(&self, location: &Location) -> Result<PlanningOutlook> {
        Ok(Self::outlook_for(location))
    }

    fn is_simulated(&self) -> bool {
        true
    }
}
