quantity!(Cost, precision: 2);

// Per-kilowatt charge applied to the power moved through the storage system.
quantity!(KilowattCharge, suffix: "/kW", precision: 4);

#[cfg(test)]
mod tests {
    use crate::quantity::{Zero, power::Kilowatts};

    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Cost(1.0) > Cost::ZERO);
        assert_eq!(Cost(-1.0).max(Cost::ZERO), Cost::ZERO);
    }

    #[test]
    fn test_display() {
        assert_eq!(Cost(1.2345).to_string(), "1.23");
        assert_eq!(Kilowatts(50.0).to_string(), "50.00 kW");
    }
}
