// src/schema.rs
//
// The extract is not self-describing: its first line is a human-readable
// label, so every column name below is assigned positionally.

/// Column names of the raw extract, in file order. The leading `section`
/// marker is dropped as soon as rows are parsed.
pub static RAW_HEADERS: [&str; 32] = [
    "section",
    "nofinesset",
    "nofinessej",
    "rs",
    "rslongue",
    "complrs",
    "compldistrib",
    "numvoie",
    "typvoie",
    "voie",
    "compvoie",
    "lieuditbp",
    "commune",
    "departement",
    "libdepartement",
    "ligneacheminement",
    "telephone",
    "telecopie",
    "categetab",
    "libcategetab",
    "categagretab",
    "libcategagretab",
    "siret",
    "codeape",
    "codemft",
    "libmft",
    "codesph",
    "libsph",
    "dateouv",
    "dateautor",
    "maj",
    "numuai",
];

/// What the first five columns of the geolocation half actually hold.
/// The file reuses the establishment header slots for these rows.
pub static GEOLOC_HEADERS: [&str; 5] = [
    "nofinesset",
    "coordxet",
    "coordyet",
    "sourcecoordet",
    "datemaj",
];

/// FINESS identifier, the join key shared by the two halves.
pub static ID_COLUMN: &str = "nofinesset";

/// Establishment category column and the code for pharmacies.
pub static CATEGORY_COLUMN: &str = "categetab";
pub const PHARMACY_CATEGORY: i64 = 620;

/// Columns kept in the published JSON, in output order.
pub static OUTPUT_COLUMNS: [&str; 13] = [
    "rs",
    "rslongue",
    "numvoie",
    "typvoie",
    "voie",
    "compvoie",
    "lieuditbp",
    "commune",
    "departement",
    "libdepartement",
    "telephone",
    "coordxet",
    "coordyet",
];
