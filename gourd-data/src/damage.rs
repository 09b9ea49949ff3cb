/// Static damage-type data.
#[derive(Clone, Copy, Debug)]
pub struct DamageType {
    pub id: u8,
    pub message_id: &'static str,
}

impl PartialEq for DamageType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for DamageType {}

impl DamageType {
    pub const GENERIC: Self = Self {
        id: 0,
        message_id: "generic",
    };

    pub const EXPLOSION: Self = Self {
        id: 1,
        message_id: "explosion",
    };
}
