/// Static dimension-type data.
#[derive(Clone, Copy, Debug)]
pub struct Dimension {
    pub name: &'static str,
    /// Whether beds set the spawn point and allow sleeping. Where they do
    /// not, using a bed blows it up instead.
    pub bed_works: bool,
}

impl PartialEq for Dimension {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Dimension {}

impl Dimension {
    pub const OVERWORLD: Self = Self {
        name: "minecraft:overworld",
        bed_works: true,
    };

    pub const NETHER: Self = Self {
        name: "minecraft:the_nether",
        bed_works: false,
    };

    pub const END: Self = Self {
        name: "minecraft:the_end",
        bed_works: false,
    };
}
