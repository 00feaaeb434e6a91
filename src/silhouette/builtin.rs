use crate::silhouette::source::SilhouetteSource;

const BUILTIN: [(&str, &[u8]); 3] = [
    (
        "portrait",
        include_bytes!("../../assets/silhouettes/portrait.svg"),
    ),
    (
        "front-facing",
        include_bytes!("../../assets/silhouettes/front-facing.svg"),
    ),
    (
        "celebration",
        include_bytes!("../../assets/silhouettes/celebration.svg"),
    ),
];

/// Names of the bundled silhouettes, in morph order.
pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    BUILTIN.iter().map(|(name, _)| *name)
}

/// The bundled human silhouettes (200x200 viewBox each), in morph order.
///
/// A bundled asset that fails to parse is logged and left out.
pub fn builtin_sources() -> Vec<SilhouetteSource> {
    BUILTIN
        .iter()
        .filter_map(|(name, svg)| match SilhouetteSource::from_svg(*name, svg) {
            Ok(src) => Some(src),
            Err(err) => {
                tracing::warn!(silhouette = name, %err, "bundled silhouette failed to parse");
                None
            }
        })
        .collect()
}
