quantity!(MegawattHourPrice, suffix: "/MWh", precision: 2);
