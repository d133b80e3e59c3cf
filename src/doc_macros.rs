//! Macros used for generating documentation

/// A macro for generating the doc-comments for parallel versions of various
/// hashing functions. It takes the name of the sequential function as an
/// argument as a string literal.
///
/// It uses concat! to generate doc-links to the provided original function name
/// in string literal form.
#[cfg(feature = "rayon")]
macro_rules! generate_parallel_doc_comment {
    ($name:literal) => {
        concat!(
            "A parallel version of [`",
            $name,
            "()`].\n\nThis function does the same operation as [`",
            $name,
            "()`] but distributes the blocks over the [rayon] thread pool.\nThe output is identical to the sequential version."
        )
    };
}
