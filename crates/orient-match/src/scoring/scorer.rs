//! Pure confidence-score transforms. Deterministic, no side effects.

/// Log-scaled rarity weight for a title seen `frequency` times in a catalog
/// of `catalog_size` records. Both inputs are kept >= 1 by the catalog
/// loader, so the logarithm's argument stays positive.
pub fn rarity_factor(catalog_size: usize, frequency: u32) -> f64 {
    ((catalog_size as f64 + 1.0) / (f64::from(frequency) + 1.0)).log10()
}

/// Maps a raw cosine similarity plus catalog statistics to a bounded,
/// display-ready confidence percentage in `[0, 100]`, rounded to 2 decimals.
///
/// The raw score is clamped into `[0, 1]` first: negative similarities carry
/// no useful ranking signal here and must not produce negative confidence.
pub fn confidence_score(raw_score: f32, frequency: u32, catalog_size: usize) -> f64 {
    let quality = f64::from(raw_score).clamp(0.0, 1.0);
    let percent = quality * rarity_factor(catalog_size, frequency) * 100.0;

    round2(percent.clamp(0.0, 100.0))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
