quantity!(Watts, "W");
quantity!(Kilowatts, "kW");

impl From<Watts> for Kilowatts {
    fn from(watts: Watts) -> Self {
        Self(watts.0 / 1000.0)
    }
}
