/// 64 random bits assembled from JavaScript's `Math.random`, one byte per call.
pub(crate) fn random_seed() -> u64 {
    let mut bytes = [0u8; 8];
    for byte in bytes.iter_mut() {
        *byte = (js_sys::Math::random() * 256.) as u8;
    }
    u64::from_le_bytes(bytes)
}

/// Seeds for successive boards: a forced seed is handed out until a start actually uses it, fresh seeds after that.
#[derive(Clone, Debug)]
pub(crate) struct SeedSource {
    forced: Option<u64>,
    fresh: fn() -> u64,
}

impl SeedSource {
    pub(crate) fn new(forced: Option<u64>) -> Self {
        Self::with_fresh(forced, random_seed)
    }

    pub(crate) fn with_fresh(forced: Option<u64>, fresh: fn() -> u64) -> Self {
        Self { forced, fresh }
    }

    /// Seed for the next start, without using up a forced one.
    pub(crate) fn candidate(&self) -> u64 {
        self.forced.unwrap_or_else(self.fresh)
    }

    /// Marks the last candidate as used.
    pub(crate) fn commit(&mut self) {
        if let Some(seed) = self.forced.take() {
            log::debug!("forced seed {} used", seed);
        }
    }

    #[cfg(test)]
    pub(crate) fn forced(&self) -> Option<u64> {
        self.forced
    }
}
