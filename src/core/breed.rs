/// Breed name (lower case) to pattern breed code
///
/// Several names intentionally share a code: a pattern drafted for one
/// breed also fits the aliased one.
const BREED_ALIASES: &[(&str, &str)] = &[
    ("beagle", "BG"),
    ("boston terrier", "BT"),
    ("boxer", "BX"),
    ("chihuahua", "CH"),
    ("dachshund", "DA"),
    ("doberman pinscher", "DP"),
    ("english bulldog", "EB"),
    ("french bulldog", "FB"),
    ("great dane", "GD"),
    ("greyhound", "GH"),
    ("golden retriever", "GR"),
    ("labrador retriever", "GR"),
    ("german shorthaired pointer", "GSP"),
    ("dalmatian", "GSP"),
    ("italian greyhound", "IG"),
    ("jack russell terrier", "JR"),
    ("miniature dachshund", "MD"),
    ("miniature pinscher", "MP"),
    ("miniature poodle", "MPD"),
    ("pug", "PG"),
    ("rhodesian ridgeback", "RR"),
    ("german shepherd", "RR"),
    ("rat terrier", "RT"),
    ("vizsla", "VS"),
    ("weimaraner", "WM"),
    ("whippet", "WP"),
];

/// Breed codes whose patterns carry a tucked-tail length variant
const TUCKED_TAIL_CODES: &[&str] = &["GH", "IG", "WP"];

/// Map a free-text breed name to its pattern breed code
///
/// Returns `None` for unrecognized breeds; callers treat that as
/// "no breed match" rather than an error.
pub fn normalize_breed(breed: &str) -> Option<&'static str> {
    let normalized = breed.trim().to_lowercase();
    BREED_ALIASES
        .iter()
        .find(|(name, _)| *name == normalized)
        .map(|(_, code)| *code)
}

/// Breed names the normalizer recognizes, sorted
pub fn available_breeds() -> Vec<&'static str> {
    let mut breeds: Vec<&'static str> = BREED_ALIASES.iter().map(|(name, _)| *name).collect();
    breeds.sort_unstable();
    breeds
}

#[inline]
pub fn is_tucked_tail_code(breed_code: &str) -> bool {
    TUCKED_TAIL_CODES.contains(&breed_code)
}
