/// Safely convert usize to f64 for ratio calculations
///
/// Row counts stay far below the range where f64 loses integer precision.
#[inline]
pub(crate) fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Bigram (Dice) similarity of two text blocks, in [0, 1].
///
/// Whitespace is dropped before the texts are split into adjacent character
/// pairs, so line wrapping and spacing differences in OCR output do not
/// count as changes. Shared bigrams are counted with multiplicity.
///
/// Returns 1.0 for texts that are equal once whitespace is removed (two
/// empty texts included). Otherwise a side shorter than two characters
/// scores 0.0.
///
/// # Examples
///
/// ```
/// use charter_diff::matching::scoring::similarity;
///
/// assert_eq!(similarity("The King shall reign", "The King shall reign"), 1.0);
/// assert_eq!(similarity("", "  "), 1.0);
/// assert_eq!(similarity("", "The King"), 0.0);
/// assert!(similarity("night", "nacht") < 0.5);
/// ```
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::sorensen_dice(a, b)
}

/// Case-insensitive variant used for chapter headings
#[must_use]
pub fn label_similarity(a: &str, b: &str) -> f64 {
    similarity(&a.to_lowercase(), &b.to_lowercase())
}
