//! Soil texture presets for every hydraulic model variant.

use crate::parameters::HydraulicModel;

/// van Genuchten parameters (thr, ths, Alfa, n, Ks, l) of the twelve USDA
/// textural classes, units cm and days.
const TEXTURES: [(&str, [f64; 6]); 12] = [
    ("Sand", [0.045, 0.43, 0.145, 2.68, 712.8, 0.5]),
    ("Loamy Sand", [0.057, 0.41, 0.124, 2.28, 350.2, 0.5]),
    ("Sandy Loam", [0.065, 0.41, 0.075, 1.89, 106.1, 0.5]),
    ("Loam", [0.078, 0.43, 0.036, 1.56, 24.96, 0.5]),
    ("Silt", [0.034, 0.46, 0.016, 1.37, 6.0, 0.5]),
    ("Silt Loam", [0.067, 0.45, 0.020, 1.41, 10.80, 0.5]),
    ("Sandy Clay Loam", [0.100, 0.39, 0.059, 1.48, 31.44, 0.5]),
    ("Clay Loam", [0.095, 0.41, 0.019, 1.31, 6.240, 0.5]),
    ("Silty Clay Loam", [0.089, 0.43, 0.010, 1.23, 1.680, 0.5]),
    ("Sandy Clay", [0.100, 0.38, 0.027, 1.23, 2.880, 0.5]),
    ("Silty Clay", [0.070, 0.36, 0.005, 1.09, 0.480, 0.5]),
    ("Clay", [0.068, 0.38, 0.008, 1.09, 4.800, 0.5]),
];

pub const DEFAULT_TEXTURE: &str = "Loam";

/// Names of the textures known to the catalog.
pub fn textures() -> impl Iterator<Item = &'static str> {
    TEXTURES.iter().map(|(name, _)| *name)
}

/// Material parameters of `texture` laid out for `model`.
///
/// Returns `None` for an unknown texture name.
pub fn soil(texture: &str, model: HydraulicModel) -> Option<Vec<f64>> {
    let [thr, ths, alfa, n, ks, l] = TEXTURES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(texture.trim()))
        .map(|(_, params)| *params)?;

    let params = match model {
        HydraulicModel::VanGenuchten | HydraulicModel::LookUpTable => {
            vec![thr, ths, alfa, n, ks, l]
        }
        HydraulicModel::ModifiedVanGenuchten => vec![thr, ths, alfa, n, ks, l, ths, thr, ths, ks],
        HydraulicModel::BrooksCorey => vec![thr, ths, 0.1, 0.2, ks, l],
        HydraulicModel::AirEntryVanGenuchten
        | HydraulicModel::DualPorosityContent
        | HydraulicModel::DurnerDualPorosity => {
            let extra: &[f64] = match model {
                HydraulicModel::DurnerDualPorosity => &[0.5, 0.03, 1.5],
                HydraulicModel::DualPorosityContent => &[0.0, 0.1, 0.0],
                _ => &[],
            };
            let mut params = vec![thr, ths, 0.03, 1.5, ks, l];
            params.extend_from_slice(extra);
            params
        }
        HydraulicModel::Kosugi => vec![thr, ths, 100.0, 1.0, ks, l],
        HydraulicModel::DualPorosityHead => {
            vec![thr, ths, 0.03, 1.5, ks, l, 0.0, 0.1, 0.0015, 1.5, 0.0]
        }
        HydraulicModel::Hysteretic => vec![thr, ths, alfa, n, ks, l, ths, ths, 2.0 * alfa, ks],
    };

    debug_assert_eq!(params.len(), model.parameter_names().len());
    Some(params)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn every_variant_matches_its_width() {
        for model in HydraulicModel::ALL.iter().copied() {
            for texture in textures() {
                let params = soil(texture, model).unwrap();
                assert_eq!(params.len(), model.parameter_names().len(), "{:?}", model);
            }
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(
            soil("silt loam", HydraulicModel::VanGenuchten),
            Some(vec![0.067, 0.45, 0.020, 1.41, 10.80, 0.5])
        );
        assert_eq!(soil("Peat", HydraulicModel::VanGenuchten), None);
    }
}
