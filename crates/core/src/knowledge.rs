//! Static reference tables: fastener and screw taxonomies.
//!
//! Compiled into the binary, never mutated at runtime. Records have no
//! identity beyond structural equality.

use serde::Serialize;

/// A named variant within a taxonomy record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxonomyVariant {
    pub name: &'static str,
    pub description: &'static str,
}

/// One entry of a taxonomy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxonomyRecord {
    pub class: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub description: &'static str,
    /// Ordered as presented to users
    pub variants: &'static [TaxonomyVariant],
}

pub type FastenerTaxonomyRecord = TaxonomyRecord;
pub type ScrewTaxonomyRecord = TaxonomyRecord;

/// Which table to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Taxonomy {
    Fasteners,
    Screws,
}

impl Taxonomy {
    pub fn records(self) -> &'static [TaxonomyRecord] {
        match self {
            Taxonomy::Fasteners => FASTENERS,
            Taxonomy::Screws => SCREWS,
        }
    }

    /// Look up a record by its type name, ignoring case.
    pub fn find(self, kind: &str) -> Option<&'static TaxonomyRecord> {
        self.records()
            .iter()
            .find(|r| r.kind.eq_ignore_ascii_case(kind))
    }
}

const fn v(name: &'static str, description: &'static str) -> TaxonomyVariant {
    TaxonomyVariant { name, description }
}

pub static FASTENERS: &[FastenerTaxonomyRecord] = &[
    TaxonomyRecord {
        class: "Threaded",
        kind: "Bolt",
        description: "Externally threaded fastener used with a nut to clamp parts together.",
        variants: &[
            v("Hex Bolt", "Six-sided head, tightened with a wrench; general structural use."),
            v("Carriage Bolt", "Domed head over a square neck that locks into wood."),
            v("Flange Bolt", "Integrated washer face spreads the clamping load."),
            v("U-Bolt", "Bent into a U to clamp pipes and round stock."),
        ],
    },
    TaxonomyRecord {
        class: "Threaded",
        kind: "Nut",
        description: "Internally threaded fastener mated with a bolt or stud.",
        variants: &[
            v("Hex Nut", "Standard six-sided nut."),
            v("Nylon Insert Lock Nut", "Polymer ring resists loosening under vibration."),
            v("Wing Nut", "Two wings allow tightening by hand."),
            v("Cap Nut", "Domed top covers the exposed thread end."),
        ],
    },
    TaxonomyRecord {
        class: "Threaded",
        kind: "Stud",
        description: "Headless rod threaded on both ends or along its full length.",
        variants: &[
            v("Fully Threaded Rod", "Continuous thread, cut to length on site."),
            v("Double-End Stud", "Threads at both ends with a plain shank between."),
        ],
    },
    TaxonomyRecord {
        class: "Non-Threaded",
        kind: "Rivet",
        description: "Permanent fastener deformed on installation to hold sheets together.",
        variants: &[
            v("Solid Rivet", "Upset with a hammer or squeezer; aerospace and structural work."),
            v("Blind Rivet", "Installed from one side with a pull mandrel."),
            v("Drive Rivet", "Set by hammering a pin into the rivet body."),
        ],
    },
    TaxonomyRecord {
        class: "Non-Threaded",
        kind: "Pin",
        description: "Cylindrical fastener that locates or retains parts.",
        variants: &[
            v("Dowel Pin", "Precision ground for accurate alignment."),
            v("Cotter Pin", "Split pin bent over to secure a castle nut or clevis."),
            v("Spring Pin", "Slotted tube held by radial spring force."),
        ],
    },
    TaxonomyRecord {
        class: "Non-Threaded",
        kind: "Washer",
        description: "Thin plate that distributes load or locks a threaded fastener.",
        variants: &[
            v("Flat Washer", "Spreads load over a larger bearing area."),
            v("Split Lock Washer", "Helical spring bites into mating surfaces."),
            v("Fender Washer", "Oversized outer diameter for thin or soft materials."),
        ],
    },
];

pub static SCREWS: &[ScrewTaxonomyRecord] = &[
    TaxonomyRecord {
        class: "Machine",
        kind: "Machine Screw",
        description: "Uniform-diameter screw threaded into a tapped hole or nut.",
        variants: &[
            v("Pan Head", "Low rounded head with a flat bearing surface."),
            v("Flat Head", "Countersunk head sits flush with the surface."),
            v("Socket Head Cap Screw", "Cylindrical head driven with a hex key."),
            v("Set Screw", "Headless; bears on a shaft to stop rotation."),
        ],
    },
    TaxonomyRecord {
        class: "Wood",
        kind: "Wood Screw",
        description: "Tapered, coarse-threaded screw that forms its own thread in timber.",
        variants: &[
            v("Flat Head Wood Screw", "Countersunk for flush finishes."),
            v("Round Head Wood Screw", "Decorative domed head left proud of the surface."),
            v("Deck Screw", "Corrosion-resistant coating for outdoor lumber."),
        ],
    },
    TaxonomyRecord {
        class: "Wood",
        kind: "Lag Screw",
        description: "Heavy hex-head wood screw for high-load timber connections.",
        variants: &[
            v("Hex Lag", "Driven with a wrench or socket."),
            v("Structural Lag", "Engineered shank rated for load-bearing joints."),
        ],
    },
    TaxonomyRecord {
        class: "Sheet Metal",
        kind: "Self-Tapping Screw",
        description: "Hardened screw that taps its own thread in a pre-drilled hole.",
        variants: &[
            v("Thread-Forming", "Displaces material without cutting chips."),
            v("Thread-Cutting", "Fluted tip cuts a thread in harder material."),
        ],
    },
    TaxonomyRecord {
        class: "Sheet Metal",
        kind: "Self-Drilling Screw",
        description: "Drill-point tip drills and taps in one operation.",
        variants: &[
            v("Hex Washer Head Tek", "Integrated washer for roofing and cladding."),
            v("Wafer Head", "Very low profile for attaching wood to metal."),
        ],
    },
    TaxonomyRecord {
        class: "Masonry",
        kind: "Concrete Screw",
        description: "Hardened screw with alternating threads for brick and concrete.",
        variants: &[
            v("Hex Head Concrete Screw", "High torque installation into solid masonry."),
            v("Flat Head Concrete Screw", "Countersunk for flush fixtures."),
        ],
    },
];
