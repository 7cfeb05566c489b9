/// Seed for the first deal when none is forced through the URL hash, built
/// from JavaScript's Math.random since wasm has no OS entropy here.
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Asks before throwing away a game that has cards face-up.
pub(crate) fn confirm_discard() -> bool {
    gloo::dialogs::confirm("Abandon the current game?")
}
