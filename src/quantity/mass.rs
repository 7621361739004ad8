use std::ops::Mul;

use crate::quantity::energy::KilowattHours;

quantity!(Kilograms, suffix: "kg", precision: 3);

// Electrolyzer specific energy: how much electricity is spent on a kilogram of hydrogen.
quantity!(KilowattHoursPerKilogram, suffix: "kWh/kg", precision: 2);

// Fuel cell specific consumption: how much hydrogen is burnt per kilowatt-hour produced.
quantity!(KilogramsPerKilowattHour, suffix: "kg/kWh", precision: 4);

impl Mul<KilowattHoursPerKilogram> for Kilograms {
    type Output = KilowattHours;

    fn mul(self, specific_energy: KilowattHoursPerKilogram) -> Self::Output {
        KilowattHours(self.0 * specific_energy.0)
    }
}
