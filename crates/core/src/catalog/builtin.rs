//! Built-in search query lists.
//!
//! Three independently curated variants are kept side by side; they overlap
//! and disagree on category granularity (type 1 vs 1a/1b/1c).

/// One query per fine-grained hair type.
pub const SINGLE_QUERY: &[(&str, &[&str])] = &[
    ("1a", &["1a straight hair"]),
    ("1b", &["1b straight hair"]),
    ("1c", &["1c straight hair"]),
    ("2a", &["2a wavy hair"]),
    ("2b", &["2b wavy hair"]),
    ("2c", &["2c wavy hair"]),
    ("3a", &["3a curly hair"]),
    ("3b", &["3b curly hair"]),
    ("3c", &["3c curly hair"]),
    ("4a", &["4a kinky coily hair"]),
    ("4b", &["4b kinky coily hair"]),
    ("4c", &["4c kinky coily hair"]),
];

/// Many descriptive variations per type; type 1 folds 1a/1b/1c together.
pub const MULTI_QUERY: &[(&str, &[&str])] = &[
    (
        "1",
        &[
            "type 1 straight hair",
            "1a straight hair",
            "1b straight hair",
            "1c straight hair",
            "straight glossy hair",
            "fine sleek strands",
            "pin straight texture hair",
            "silky flowing straight hair",
            "body volume straight",
            "coarse thick straight",
            "flat hair",
            "smooth shiny hair",
            "natural straight hairstyle",
            "straight hair style",
            "voluminous sleek texture",
            "curl resistant straight hair",
            "straight natural flow",
            "sleek natural straight hair",
            "thin straight hair",
            "thick straight hair",
        ],
    ),
    (
        "2a",
        &[
            "2a wavy hair",
            "loose wavy hair",
            "fine loose wavy hair",
            "type 2a hair care",
            "natural wavy hair 2a",
            "type 2a frizzy hair care",
            "hair type 2a style",
            "wavy beach hairstyle",
            "loose beachy waves",
            "fine wavy texture hair",
            "light subtle s-curve hair",
            "lightweight wavy strands",
            "frizz prone loose wavy hair",
            "loose wavy hair texture",
            "root-to-mid straight waves",
            "wavy hair less volume at roots",
            "wide s-shaped wavy hairstyle",
            "wide s shape hair",
            "type 2a hair s-shaped waves",
            "2a hair beach waves",
            "gentle wavy hairstyle",
            "soft cascading hair curls",
            "subtle wavy hair",
            "fine loose s-shaped wavy hair",
            "lightweight S-pattern hair",
        ],
    ),
    (
        "2b",
        &[
            "type 2b wavy hair",
            "medium wavy hair",
            "2b hair care",
            "defined wavy hair 2b",
            "type 2b hair chart classification",
            "natural 2b waves",
            "midlength waves 2b hair type",
            "s-shape curl 2b hair",
            "hairstyle for 2b wavy hair",
            "frizz-prone wavy hair 2b",
            "defined S-shaped waves",
            "frizz-prone wavy texture",
            "moderate wavy hair",
            "pronounced S-curve hair",
            "frizzy wavy hair texture",
            "medium thick waves 2b",
            "structured S-pattern hair",
            "emphasized wavy bends 2b",
            "medium-texture waves 2b type hair",
            "marked S-formation hair",
            "natural hair type 2b",
        ],
    ),
    (
        "2c",
        &[
            "root-starting defined waves",
            "voluminous wavy texture",
            "frizz-resistant styling pattern",
            "dense wave formation",
            "thick S-shaped strands",
            "coarse wavy structure",
            "abundant wave volume",
            "stubborn styling waves",
            "full-bodied undulation",
            "heavy wavy density",
            "robust S-curve pattern",
            "bulky wave texture",
            "pronounced frizz waves",
            "substantial wavy body",
            "thick undulating strands",
            "root-level wave start",
            "resistant wave styling",
            "full wavy dimension",
            "dense S-formation hair",
            "voluminous frizzy waves",
        ],
    ),
    (
        "3a",
        &[
            "loose loop curls",
            "quarter-sized ringlets",
            "wide-diameter spirals",
            "bouncy loose coils",
            "large curl circumference",
            "relaxed ringlet pattern",
            "big loopy texture",
            "broad spiral formation",
            "spacious curl structure",
            "gentle ringlet definition",
            "wide coil diameter",
            "loose spring pattern",
            "large curly loops",
            "open spiral texture",
            "broad ringlet formation",
            "expansive curl pattern",
            "loose bouncing coils",
            "quarter-width spirals",
            "wide curly dimension",
            "relaxed coil structure",
        ],
    ),
    (
        "3b",
        &[
            "penny-sized ringlets",
            "well-defined bouncy spirals",
            "marker-diameter coils",
            "tight springy ringlets",
            "medium curl circumference",
            "defined bouncing pattern",
            "compact spiral formation",
            "mid-sized coil texture",
            "structured ringlet definition",
            "moderate curl diameter",
            "bouncy spring structure",
            "clear spiral delineation",
            "penny-width curls",
            "defined coil formation",
            "medium ringlet texture",
            "structured bouncing spirals",
            "compact curl pattern",
            "marker-sized coils",
            "precise ringlet definition",
            "mid-diameter spring texture",
        ],
    ),
    (
        "3c",
        &[
            "pencil-width spirals",
            "tightly-packed coils",
            "dense corkscrew texture",
            "narrow curl circumference",
            "compact spiral formation",
            "small-diameter ringlets",
            "crowded coil pattern",
            "tight spring structure",
            "closely-wound spirals",
            "pencil-sized curls",
            "dense ringlet formation",
            "narrow coil diameter",
            "compressed spiral texture",
            "packed corkscrew pattern",
            "small curl structure",
            "tight coil definition",
            "compact ringlet density",
            "narrow spring formation",
            "crowded spiral texture",
            "pencil-diameter coils",
        ],
    ),
    (
        "4a",
        &[
            "densely-packed springy coils",
            "S-shaped defined texture",
            "tight springy formation",
            "compact coil definition",
            "dense S-pattern structure",
            "springy curl density",
            "closely-wound S-coils",
            "packed spring texture",
            "defined tight formation",
            "dense springy spirals",
            "compact S-shaped coils",
            "crowded spring pattern",
            "tight density structure",
            "S-curl definition texture",
            "packed springy formation",
            "dense coil arrangement",
            "tight S-pattern hair",
            "compressed spring coils",
            "compact defined texture",
            "densely springy structure",
        ],
    ),
    (
        "4b",
        &[
            "zigzag coil pattern",
            "Z-shaped texture formation",
            "angular coil structure",
            "dryness-prone tight pattern",
            "sharp-angled coils",
            "zigzag density texture",
            "geometric Z-formation hair",
            "angular spring pattern",
            "bent coil structure",
            "Z-pattern tight texture",
            "sharp zigzag coils",
            "angular dense formation",
            "geometric coil pattern",
            "Z-shaped springy texture",
            "bent tight structure",
            "zigzag arrangement hair",
            "angular coil density",
            "sharp Z-pattern texture",
            "geometric spring formation",
            "zigzag tight coils",
        ],
    ),
    (
        "4c",
        &[
            "extremely tight coils",
            "fragile dense texture",
            "minimal definition pattern",
            "very compressed coils",
            "delicate tight structure",
            "undefined dense formation",
            "ultra-tight coil texture",
            "fragile springy pattern",
            "extremely packed structure",
            "barely-defined coils",
            "ultra-dense formation",
            "very delicate texture",
            "tightly-compressed pattern",
            "minimal-definition coils",
            "fragile dense structure",
            "extremely tight formation",
            "ultra-packed texture",
            "very fragile coils",
            "compressed dense pattern",
            "ultra-tight delicate hair",
        ],
    ),
];

/// A handful of query variations per fine-grained type, `1a` through `4c`.
pub const FINE_MULTI_QUERY: &[(&str, &[&str])] = &[
    (
        "1a",
        &[
            "1a straight hair",
            "type 1a hair",
            "fine straight hair 1a",
            "1a straight hair texture",
            "straight hair type 1a examples",
        ],
    ),
    (
        "1b",
        &[
            "1b straight hair",
            "type 1b hair",
            "1b hair texture",
            "straight hair 1b examples",
            "1b straight hair pattern",
        ],
    ),
    (
        "1c",
        &[
            "1c straight hair",
            "type 1c hair",
            "coarse straight hair 1c",
            "1c hair texture",
            "straight hair 1c examples",
        ],
    ),
    (
        "2a",
        &[
            "2a wavy hair",
            "type 2a hair",
            "loose wavy hair 2a",
            "2a wavy hair texture",
            "wavy hair 2a examples",
        ],
    ),
    (
        "2b",
        &[
            "2b wavy hair",
            "type 2b hair",
            "medium wavy hair 2b",
            "2b wavy hair pattern",
            "wavy hair 2b examples",
        ],
    ),
    (
        "2c",
        &[
            "2c wavy hair",
            "type 2c hair",
            "2c wavy curly hair",
            "2c hair texture",
            "wavy hair 2c examples",
        ],
    ),
    (
        "3a",
        &[
            "3a curly hair",
            "type 3a hair",
            "loose curly hair 3a",
            "3a curl pattern",
            "curly hair 3a examples",
        ],
    ),
    (
        "3b",
        &[
            "3b curly hair",
            "type 3b hair",
            "tight curly hair 3b",
            "3b curl pattern",
            "curly hair 3b examples",
        ],
    ),
    (
        "3c",
        &[
            "3c curly hair",
            "type 3c hair",
            "tight curly hair 3c",
            "3c curl pattern",
            "curly hair 3c examples",
        ],
    ),
    (
        "4a",
        &[
            "4a kinky coily hair",
            "type 4a hair",
            "4a coily hair texture",
            "4a hair pattern",
            "kinky coily hair 4a",
        ],
    ),
    (
        "4b",
        &[
            "4b kinky coily hair",
            "type 4b hair",
            "4b coily hair texture",
            "4b zigzag pattern",
            "kinky coily hair 4b",
        ],
    ),
    (
        "4c",
        &[
            "4c kinky coily hair",
            "type 4c hair",
            "4c coily hair texture",
            "4c hair pattern",
            "kinky coily hair 4c",
        ],
    ),
];
