use std::ops::Mul;

use crate::quantity::{
    cost::{Cost, KilowattCharge},
    energy::KilowattHours,
    time::Hours,
};

quantity!(Kilowatts, suffix: "kW", precision: 2);

impl Mul<Hours> for Kilowatts {
    type Output = KilowattHours;

    fn mul(self, hours: Hours) -> Self::Output {
        KilowattHours(self.0 * hours.0)
    }
}

impl Mul<KilowattCharge> for Kilowatts {
    type Output = Cost;

    fn mul(self, charge: KilowattCharge) -> Self::Output {
        Cost(self.0 * charge.0)
    }
}
