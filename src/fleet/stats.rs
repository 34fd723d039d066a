use crate::fleet::result::Assignment;

/// Per-kilometer cost factors for the derived estimates. Each field can be
/// tuned independently of the aggregation itself.
#[derive(Clone, Copy, Debug)]
pub struct CostModel {
    /// Minutes per km
    pub time_per_km: f64,
    /// Fixed stop overhead in minutes
    pub time_overhead: f64,
    /// Liters per km
    pub fuel_per_km: f64,
    /// Currency units (INR) per km
    pub cost_per_km: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            time_per_km: 2.2,
            time_overhead: 8.0,
            fuel_per_km: 0.18,
            cost_per_km: 12.0,
        }
    }
}

impl CostModel {
    pub fn est_time_min(&self, km: f64) -> f64 {
        km * self.time_per_km + self.time_overhead
    }

    pub fn est_fuel_l(&self, km: f64) -> f64 {
        km * self.fuel_per_km
    }

    pub fn est_cost(&self, km: f64) -> f64 {
        km * self.cost_per_km
    }
}

/// Fleet-level summary derived from one assignment list.
#[derive(Clone, Debug, Default)]
pub struct FleetStats {
    pub trucks_used: usize,
    pub total_km: f64,
    pub avg_km: f64,
    /// Estimated delivery time for the average route, minutes
    pub est_time_min: f64,
    /// Estimated fuel for the whole fleet, liters
    pub est_fuel_l: f64,
    /// Estimated cost for the whole fleet
    pub est_cost: f64,
}

impl FleetStats {
    pub fn compute(assignments: &[Assignment], model: &CostModel) -> Self {
        let trucks_used = assignments.len();
        let total_km: f64 = assignments.iter().map(|a| a.total_distance).sum();
        let avg_km = if trucks_used > 0 {
            total_km / trucks_used as f64
        } else {
            0.0
        };

        Self {
            trucks_used,
            total_km,
            avg_km,
            est_time_min: model.est_time_min(avg_km),
            est_fuel_l: model.est_fuel_l(total_km),
            est_cost: model.est_cost(total_km),
        }
    }
}
