use std::ops::{Div, Mul};

use crate::quantity::{
    cost::Cost,
    mass::{Kilograms, KilogramsPerKilowattHour, KilowattHoursPerKilogram},
    power::Kilowatts,
    price::MegawattHourPrice,
    time::Hours,
};

quantity!(KilowattHours, suffix: "kWh", precision: 3);

impl Div<Hours> for KilowattHours {
    type Output = Kilowatts;

    fn div(self, hours: Hours) -> Self::Output {
        Kilowatts(self.0 / hours.0)
    }
}

/// Hydrogen produced by spending the energy in an electrolyzer.
impl Div<KilowattHoursPerKilogram> for KilowattHours {
    type Output = Kilograms;

    fn div(self, specific_energy: KilowattHoursPerKilogram) -> Self::Output {
        Kilograms(self.0 / specific_energy.0)
    }
}

/// Hydrogen consumed by a fuel cell to produce the energy.
impl Mul<KilogramsPerKilowattHour> for KilowattHours {
    type Output = Kilograms;

    fn mul(self, consumption: KilogramsPerKilowattHour) -> Self::Output {
        Kilograms(self.0 * consumption.0)
    }
}

impl Mul<MegawattHourPrice> for KilowattHours {
    type Output = Cost;

    fn mul(self, price: MegawattHourPrice) -> Self::Output {
        Cost(self.0 * price.0 / 1000.0)
    }
}
