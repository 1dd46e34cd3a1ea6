use {
    crate::{
        catalog,
        error::{DeckError, Result},
        mesh::{self, Mesh},
    },
    serde::{Deserialize, Serialize},
};

/// Declares a fieldless enum whose variants map to the integer identifiers
/// used in the deck.
macro_rules! identifiers {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident = $id:expr),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn id(self) -> i64 {
                match self {
                    $($name::$variant => $id),+
                }
            }

            pub fn from_id(id: i64) -> Option<Self> {
                match id {
                    $(x if x == $id => Some($name::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

identifiers!(
    /// Geometry of the flow domain (`Kat`)
    DomainType {
        HorizontalPlane = 0,
        Axisymmetric = 1,
        VerticalPlane = 2,
    }
);

identifiers!(
    /// Soil hydraulic property model (`Model`)
    HydraulicModel {
        VanGenuchten = 0,
        ModifiedVanGenuchten = 1,
        BrooksCorey = 2,
        /// van Genuchten with an air-entry value of -2 cm
        AirEntryVanGenuchten = 3,
        Kosugi = 4,
        DurnerDualPorosity = 5,
        /// Dual porosity, mass transfer proportional to effective saturation
        DualPorosityContent = 6,
        /// Dual porosity, mass transfer proportional to pressure head
        DualPorosityHead = 7,
        /// van Genuchten with hysteresis parameters
        Hysteretic = 8,
        LookUpTable = 9,
    }
);

identifiers!(
    /// Hysteresis in the soil hydraulic properties (`Hysteresis`)
    Hysteresis {
        Disabled = 0,
        Retention = 1,
        RetentionConductivity = 2,
        Lenhard = 3,
    }
);

identifiers!(
    /// Branch the initial condition is computed from (`iKappa`)
    InitialBranch {
        Drying = -1,
        Wetting = 1,
    }
);

identifiers!(
    /// Root water uptake reduction model
    UptakeModel {
        Feddes = 0,
        SShape = 1,
    }
);

identifiers!(
    /// Spatial root distribution (`iRootZoneShape`)
    RootZoneShape {
        Vrugt = 0,
        VanGenuchtenHoffman = 1,
        Constant = 2,
    }
);

identifiers!(
    /// How the rooting depth is specified (`iRootDepthEntry`)
    RootDepthEntry {
        Constant = 0,
        Table = 1,
        GrowthFunction = 2,
    }
);

identifiers!(
    /// Type of reservoir boundary (`iWell`)
    ReservoirKind {
        Well = 1,
        Furrow = 2,
        Wetland = 3,
    }
);

const BASE_PARAMETERS: [&str; 6] = ["thr", "ths", "Alfa", "n", "Ks", "l"];

impl HydraulicModel {
    /// Names of the material parameters following the material name.
    pub fn parameter_names(self) -> &'static [&'static str] {
        match self {
            HydraulicModel::ModifiedVanGenuchten => {
                &["thr", "ths", "Alfa", "n", "Ks", "l", "Qm", "Qa", "Qk", "Kk"]
            }
            HydraulicModel::DurnerDualPorosity => {
                &["thr", "ths", "Alfa", "n", "Ks", "l", "w2", "Alfa2", "n2"]
            }
            HydraulicModel::DualPorosityContent => {
                &["thr", "ths", "Alfa", "n", "Ks", "l", "thrIm", "thsIm", "Omega"]
            }
            HydraulicModel::DualPorosityHead => &[
                "thr", "ths", "Alfa", "n", "Ks", "l", "thrIm", "thsIm", "AlfaIm", "nIm", "Omega",
            ],
            HydraulicModel::Hysteretic => {
                &["thr", "ths", "Alfa", "n", "Ks", "l", "thm", "thsW", "AlfaW", "KsW"]
            }
            _ => &BASE_PARAMETERS,
        }
    }
}

/// Solute transport module, written as the `lEquil`, `lUnsatCh`, `lCFSTr`
/// and `lHP2` switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportModel {
    Standard,
    UnsatChem,
    ColloidFacilitated,
    Hp2,
}

/// Simulation parameters
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    pub general: General,
    pub hydraulic: Hydraulic,
    pub time: Time,
    pub output: Output,
    pub iteration: Iteration,
    pub solute: Solute,
    pub heat: Heat,
    pub root_uptake: RootUptake,
    pub root_growth: RootGrowth,
    pub boundary: Boundary,
    pub atmosphere: Atmosphere,
    pub domain: Domain,
    pub limits: Limits,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct General {
    /// Free-text description of the case
    pub heading: String,
    pub length_unit: String,
    pub time_unit: String,
    pub mass_unit: String,
    pub domain_type: DomainType,
    /// Transient water flow (`lWat`)
    pub water_flow: bool,
    /// Parameter estimation (`lInv`)
    pub inverse: bool,
    /// Mesh produced by an external generator (`lExtGen`)
    pub external_mesh: bool,
}

impl Default for General {
    fn default() -> Self {
        General {
            heading: "Welcome to HYDRUS".to_owned(),
            length_unit: "cm".to_owned(),
            time_unit: "days".to_owned(),
            mass_unit: "mmol".to_owned(),
            domain_type: DomainType::VerticalPlane,
            water_flow: true,
            inverse: false,
            external_mesh: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub name: String,
    pub params: Vec<f64>,
}

impl Material {
    pub fn from_catalog(texture: &str, model: HydraulicModel) -> Option<Material> {
        catalog::soil(texture, model).map(|params| Material {
            name: texture.to_owned(),
            params,
        })
    }
}

impl Default for Material {
    fn default() -> Self {
        Material {
            name: catalog::DEFAULT_TEXTURE.to_owned(),
            params: catalog::soil(catalog::DEFAULT_TEXTURE, HydraulicModel::VanGenuchten)
                .unwrap_or_default(),
        }
    }
}

/// Soil hydraulic model and material table.
///
/// The model and hysteresis mode are only changed through setters so the
/// material rows always follow the width of the effective model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hydraulic {
    model: HydraulicModel,
    hysteresis: Hysteresis,
    /// Only written when hysteresis is enabled
    pub initial_branch: InitialBranch,
    /// Number of subregions with separate water balances (`NLay`)
    pub subregions: usize,
    /// Lower limit of the tension interval (`hTab1`)
    pub h_tab_min: f64,
    /// Upper limit of the tension interval (`hTabN`)
    pub h_tab_max: f64,
    /// Temperature dependent hydraulic properties (`lWTDep`)
    pub temperature_dependent: bool,
    pub materials: Vec<Material>,
}

impl Default for Hydraulic {
    fn default() -> Self {
        Hydraulic {
            model: HydraulicModel::VanGenuchten,
            hysteresis: Hysteresis::Disabled,
            initial_branch: InitialBranch::Drying,
            subregions: 1,
            h_tab_min: 0.0001,
            h_tab_max: 10000.0,
            temperature_dependent: false,
            materials: vec![Material::default()],
        }
    }
}

impl Hydraulic {
    pub fn model(&self) -> HydraulicModel {
        self.model
    }

    pub fn hysteresis(&self) -> Hysteresis {
        self.hysteresis
    }

    /// Model that governs the material table; hysteresis forces the
    /// hysteretic variant whatever the nominal model is.
    pub fn effective_model(&self) -> HydraulicModel {
        if self.hysteresis == Hysteresis::Disabled {
            self.model
        } else {
            HydraulicModel::Hysteretic
        }
    }

    /// Width of a material row, name included.
    pub fn material_columns(&self) -> usize {
        1 + self.effective_model().parameter_names().len()
    }

    pub fn set_model(&mut self, model: HydraulicModel) {
        self.model = model;
        self.reseed_materials();
    }

    /// Any mode other than `Disabled` switches the material table to the
    /// hysteretic variant; the nominal model is kept.
    pub fn set_hysteresis(&mut self, hysteresis: Hysteresis) {
        self.hysteresis = hysteresis;
        self.reseed_materials();
    }

    /// Replaces rows that no longer fit the effective model with catalog
    /// values for the material's texture, or Loam for unknown names.
    fn reseed_materials(&mut self) {
        let model = self.effective_model();
        let width = model.parameter_names().len();
        for material in self.materials.iter_mut() {
            if material.params.len() != width {
                material.params = catalog::soil(&material.name, model)
                    .or_else(|| catalog::soil(catalog::DEFAULT_TEXTURE, model))
                    .unwrap_or_else(|| vec![0.0; width]);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Time {
    /// Initial time of the simulation
    pub t_init: f64,
    /// Final time of the simulation
    pub t_max: f64,
    /// Initial time increment
    pub dt: f64,
    /// Minimum permitted time increment
    pub dt_min: f64,
    /// Maximum permitted time increment
    pub dt_max: f64,
    /// Print times, the first being `t_init`
    pub print_times: Vec<f64>,
}

impl Default for Time {
    fn default() -> Self {
        Time {
            t_init: 0.0,
            t_max: 1.0,
            dt: 0.0001,
            dt_min: 1e-5,
            dt_max: 5.0,
            print_times: vec![0.0, 1.0],
        }
    }
}

impl Time {
    /// Number of print times written to the deck (`MPL`).
    pub fn print_count(&self) -> usize {
        self.print_times.len().saturating_sub(1)
    }

    /// Spreads `count` print times evenly over the simulation period.
    pub fn set_print_count(&mut self, count: usize) {
        let span = self.t_max - self.t_init;
        self.print_times = (0..=count)
            .map(|i| {
                if i == count {
                    self.t_max
                } else {
                    self.t_init + span * i as f64 / count.max(1) as f64
                }
            })
            .collect();
        if count == 0 {
            self.print_times = vec![self.t_init];
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    /// Print only at preselected times (`Short`)
    pub short: bool,
    pub print_step: i64,
    /// Print observation data at a constant interval (`Inter`)
    pub interval: bool,
    pub print_interval: f64,
    /// Print to screen (`lScrn`)
    pub screen: bool,
    /// Wait for the enter key at the end of the run (`lEnter`)
    pub press_enter: bool,
}

impl Default for Output {
    fn default() -> Self {
        Output {
            short: false,
            print_step: 1,
            interval: false,
            print_interval: 1.0,
            screen: true,
            press_enter: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Iteration {
    /// Maximum number of iterations per time step (`MaxIt`)
    pub max_iterations: i64,
    /// Water content tolerance in the unsaturated region (`TolTh`)
    pub water_content_tolerance: f64,
    /// Pressure head tolerance in the saturated region (`TolH`)
    pub pressure_head_tolerance: f64,
    /// Initial condition given as pressure head rather than water content
    pub initial_pressure_head: bool,
    /// Lower bound of the optimal iteration range
    pub it_min: i64,
    /// Upper bound of the optimal iteration range
    pub it_max: i64,
    /// Time step multiplier below `it_min` iterations
    pub dmul: f64,
    /// Time step multiplier above `it_max` iterations
    pub dmul2: f64,
}

impl Default for Iteration {
    fn default() -> Self {
        Iteration {
            max_iterations: 10,
            water_content_tolerance: 0.001,
            pressure_head_tolerance: 1.0,
            initial_pressure_head: false,
            it_min: 3,
            it_max: 7,
            dmul: 1.3,
            dmul2: 0.7,
        }
    }
}

/// Number of reaction parameters per material and solute.
pub const REACTION_PARAMETERS: usize = 14;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Solute {
    /// Solute transport (`lChem`)
    pub enabled: bool,
    pub transport: TransportModel,
    /// Temporal weighting (0 explicit, 0.5 Crank-Nicholson, 1 implicit)
    pub epsi: f64,
    /// Upstream weighting instead of Galerkin (`lUpW`)
    pub upstream: bool,
    pub artificial_dispersion: bool,
    /// Temperature dependent transport and reaction (`lTDep`)
    pub temperature_dependent: bool,
    /// Water content dependent reaction (`lWatDep`)
    pub water_content_dependent: bool,
    pub abs_tolerance: f64,
    pub rel_tolerance: f64,
    pub max_iterations: i64,
    /// Stability criterion `PeCr`
    pub peclet_courant: f64,
    pub tortuosity: bool,
    /// Moldrup tortuosity model (`lTortM`)
    pub moldrup_tortuosity: bool,
    /// Attachment/detachment for viruses, colloids or bacteria (`Bacter`)
    pub bacteria: bool,
    /// Attachment from filtration theory
    pub filtration: bool,
    /// Initial condition as total mass (`lInitM`)
    pub initial_total_mass: bool,
    pub initial_equilibrium: bool,
    pub fumigant: bool,
    /// Additional fumigant injection (`lAddFum`), requires `fumigant`
    pub additional_fumigant: bool,
    /// Per material: bulk density, longitudinal and transverse dispersivity,
    /// fraction of sorption sites, immobile water content
    pub soil: Vec<Vec<f64>>,
    pub species: Vec<Species>,
    /// Pulse duration (`tPulse`)
    pub pulse_duration: f64,
    pub injection: FumigantInjection,
    /// Parameters per water-content dependence row (`nParamWC`)
    pub water_content_parameters: usize,
}

impl Default for Solute {
    fn default() -> Self {
        Solute {
            enabled: false,
            transport: TransportModel::Standard,
            epsi: 0.5,
            upstream: false,
            artificial_dispersion: false,
            temperature_dependent: false,
            water_content_dependent: false,
            abs_tolerance: 0.0,
            rel_tolerance: 0.0,
            max_iterations: 1,
            peclet_courant: 2.0,
            tortuosity: true,
            moldrup_tortuosity: false,
            bacteria: false,
            filtration: false,
            initial_total_mass: false,
            initial_equilibrium: false,
            fumigant: false,
            additional_fumigant: false,
            soil: vec![default_solute_soil()],
            species: vec![Species::default()],
            pulse_duration: 1.0,
            injection: FumigantInjection::default(),
            water_content_parameters: 9,
        }
    }
}

fn default_solute_soil() -> Vec<f64> {
    vec![1.5, 0.5, 0.1, 1.0, 0.0]
}

fn default_reactions() -> Vec<f64> {
    let mut row = vec![0.0; REACTION_PARAMETERS];
    row[2] = 1.0;
    row
}

/// One solute of the reaction chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Species {
    /// Molecular diffusion in water (`DifW`)
    pub diffusion_water: f64,
    /// Molecular diffusion in soil air (`DifG`)
    pub diffusion_gas: f64,
    /// Per material reaction parameters, `REACTION_PARAMETERS` wide
    pub reactions: Vec<Vec<f64>>,
    /// Activation energies of `DifW` and `DifG`
    pub temperature_diffusion: Vec<f64>,
    /// Activation energies of the reaction parameters
    pub temperature_reactions: Vec<f64>,
    /// Boundary concentrations (`cTop`, `cBot`, ...)
    pub boundary: Vec<f64>,
    /// Two rows of `water_content_parameters` values
    pub water_content: Vec<Vec<f64>>,
}

impl Default for Species {
    fn default() -> Self {
        Species {
            diffusion_water: 0.0,
            diffusion_gas: 0.0,
            reactions: vec![default_reactions()],
            temperature_diffusion: vec![0.0; 2],
            temperature_reactions: vec![0.0; REACTION_PARAMETERS],
            boundary: vec![0.0; 9],
            water_content: vec![vec![0.0; 9]; 2],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FumigantInjection {
    pub time: f64,
    pub mass: f64,
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heat {
    /// Heat transport (`lTemp`)
    pub enabled: bool,
    /// Per material: Qn, Qo, dispersivity, b1..b3, Cn, Co, Cw
    pub materials: Vec<Vec<f64>>,
    /// Boundary temperatures (`TTop`, `TBot`, ...)
    pub boundary: Vec<f64>,
    /// Temperature amplitude at the soil surface
    pub amplitude: f64,
    /// Period of one temperature cycle
    pub period: f64,
}

impl Default for Heat {
    fn default() -> Self {
        Heat {
            enabled: false,
            materials: vec![default_heat_material()],
            boundary: vec![0.0; 6],
            amplitude: 5.0,
            period: 1.0,
        }
    }
}

fn default_heat_material() -> Vec<f64> {
    vec![
        0.59, 0.0, 5.0, 1.0, 1.56728e16, 2.53474e16, 9.89388e16, 1.43327e14, 1.8737e14,
        3.12035e14,
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootUptake {
    /// Root water uptake (`lSink`)
    pub enabled: bool,
    pub model: UptakeModel,
    /// Critical stress index (`OmegaC`)
    pub critical_stress: f64,
    pub feddes: Feddes,
    pub s_shape: SShape,
    /// Uptake reduced by salinity, only with solute transport
    pub solute_reduction: bool,
    /// Salinity stress additive (true) or multiplicative to head stress
    pub additive: bool,
    pub c50: f64,
    pub p3c: f64,
    /// Osmotic coefficient per solute
    pub osmotic: Vec<f64>,
    /// S-shaped salinity response instead of the Maas threshold (`lMsSink`)
    pub s_shaped_salinity: bool,
    /// Active solute uptake (`lActRSU`)
    pub active_uptake: bool,
    pub active: ActiveUptake,
}

impl Default for RootUptake {
    fn default() -> Self {
        RootUptake {
            enabled: false,
            model: UptakeModel::Feddes,
            critical_stress: 1.0,
            feddes: Feddes::default(),
            s_shape: SShape::default(),
            solute_reduction: false,
            additive: true,
            c50: 16.0,
            p3c: 2.5,
            osmotic: vec![1.0],
            s_shaped_salinity: false,
            active_uptake: false,
            active: ActiveUptake::default(),
        }
    }
}

/// Feddes stress response, pasture preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feddes {
    pub p0: f64,
    pub p2h: f64,
    pub p2l: f64,
    pub p3: f64,
    pub r2h: f64,
    pub r2l: f64,
    /// Optimal uptake head per material (`POptm`)
    pub poptm: Vec<f64>,
}

impl Default for Feddes {
    fn default() -> Self {
        Feddes {
            p0: -10.0,
            p2h: -200.0,
            p2l: -800.0,
            p3: -8000.0,
            r2h: 0.5,
            r2l: 0.1,
            poptm: vec![-25.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SShape {
    pub p50: f64,
    pub p3: f64,
    pub pw: f64,
}

impl Default for SShape {
    fn default() -> Self {
        SShape {
            p50: -800.0,
            p3: 3.0,
            pw: -1e10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveUptake {
    pub omega_s: f64,
    pub s_pot: f64,
    pub km: f64,
    pub c_min: f64,
    /// Nutrient demand reduced with root water uptake (`OmegaW`)
    pub omega_w: bool,
}

impl Default for ActiveUptake {
    fn default() -> Self {
        ActiveUptake {
            omega_s: 1.0,
            s_pot: 0.0,
            km: 0.0,
            c_min: 0.0,
            omega_w: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootGrowth {
    /// Root growth (`lRootGr`)
    pub enabled: bool,
    pub zone_shape: RootZoneShape,
    pub depth_entry: RootDepthEntry,
    /// Horizontal root distribution is specified too
    pub horizontal: bool,
    pub plants: usize,
    /// Horizontal centre of each plant, written when `horizontal`
    pub centers: Vec<f64>,
    pub vrugt: Vrugt,
    pub depth: f64,
    pub half_width: f64,
    /// Rows of time, depth and width
    pub depth_table: Vec<Vec<f64>>,
    pub growth: GrowthFunction,
}

impl Default for RootGrowth {
    fn default() -> Self {
        RootGrowth {
            enabled: false,
            zone_shape: RootZoneShape::Constant,
            depth_entry: RootDepthEntry::GrowthFunction,
            horizontal: false,
            plants: 1,
            centers: vec![0.0],
            vrugt: Vrugt::default(),
            depth: 40.0,
            half_width: 20.0,
            depth_table: vec![vec![0.0; 3]],
            growth: GrowthFunction::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vrugt {
    pub zm: f64,
    pub z0: f64,
    pub a: f64,
    pub rm: f64,
    pub r0: f64,
    pub b: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthFunction {
    /// Root growth factor from data (0) or from 50% after half the period (1)
    pub factor: i64,
    pub t_min: f64,
    pub t_med: f64,
    /// Harvest time
    pub t_max: f64,
    pub period: f64,
    pub z_min: f64,
    pub z_med: f64,
    pub z_max: f64,
    pub r_min: f64,
    pub r_max: f64,
}

impl Default for GrowthFunction {
    fn default() -> Self {
        GrowthFunction {
            factor: 0,
            t_min: 0.0,
            t_med: 0.0,
            t_max: 90.0,
            period: 365.0,
            z_min: 0.01,
            z_med: 0.01,
            z_max: 90.0,
            r_min: 1.0,
            r_max: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Boundary {
    /// Seepage faces (`SeepF`)
    pub seepage_faces: bool,
    pub free_drainage: bool,
    /// Discharge-groundwater level relation at the bottom (`qQWLF`)
    pub discharge_level: bool,
    /// Time-variable heads are interpolated (`Interp`)
    pub interpolate: bool,
    /// `H/Flux`
    pub head_to_flux: bool,
    /// `H/Flx1`
    pub head_to_zero_flux: bool,
    /// `Atm/H`
    pub atmospheric_head: bool,
    /// `Seep/H`
    pub seepage_head_switch: bool,
    /// `Atm/WL`
    pub atmospheric_level: bool,
    /// `Atm/SF`
    pub atmospheric_flux: bool,
    pub snow: bool,
    pub gradient: bool,
    pub gradient_value: f64,
    pub subsurface_drip: bool,
    pub drip: SubsurfaceDrip,
    pub surface_drip: bool,
    pub surface: SurfaceDrip,
    pub seepage_face: bool,
    /// Pressure head of the seepage face (`hSeep`)
    pub seepage_head: f64,
    pub triggered_irrigation: bool,
    pub irrigation: Irrigation,
    /// Reservoir boundary condition (`WellBC`)
    pub reservoir: bool,
    pub well: Reservoir,
    /// 1-based node numbers
    pub observation_nodes: Vec<usize>,
    /// Number of flowing particles (`NPart`)
    pub particles: i64,
    /// Length of soil surface associated with transpiration
    pub transpiration_length: f64,
    pub drains: Drains,
}

impl Default for Boundary {
    fn default() -> Self {
        Boundary {
            seepage_faces: false,
            free_drainage: false,
            discharge_level: false,
            interpolate: false,
            head_to_flux: false,
            head_to_zero_flux: false,
            atmospheric_head: false,
            seepage_head_switch: false,
            atmospheric_level: false,
            atmospheric_flux: false,
            snow: false,
            gradient: false,
            gradient_value: 1.0,
            subsurface_drip: false,
            drip: SubsurfaceDrip::default(),
            surface_drip: false,
            surface: SurfaceDrip::default(),
            seepage_face: false,
            seepage_head: 0.0,
            triggered_irrigation: false,
            irrigation: Irrigation::default(),
            reservoir: false,
            well: Reservoir::default(),
            observation_nodes: Vec::new(),
            particles: 0,
            transpiration_length: 0.0,
            drains: Drains::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubsurfaceDrip {
    pub flux: f64,
    /// Emitter exponent, 0.5 turbulent and 1 laminar
    pub exponent: f64,
}

impl Default for SubsurfaceDrip {
    fn default() -> Self {
        SubsurfaceDrip {
            flux: 0.0,
            exponent: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceDrip {
    pub center: i64,
    /// Ponding spreads left to right (-1), both ways (0) or right to left (1)
    pub direction: i64,
}

impl Default for SurfaceDrip {
    fn default() -> Self {
        SurfaceDrip {
            center: 0,
            direction: -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Irrigation {
    pub node: i64,
    /// Trigger pressure head
    pub head: f64,
    /// Boundary type: -4 atmospheric, -3 or 3 variable flux or head
    pub kind: i64,
    pub rate: f64,
    pub duration: f64,
    pub lag: f64,
}

impl Default for Irrigation {
    fn default() -> Self {
        Irrigation {
            node: 1,
            head: -1000.0,
            kind: -4,
            rate: 0.0,
            duration: 0.0,
            lag: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reservoir {
    pub kind: ReservoirKind,
    pub bottom: f64,
    pub initial_level: f64,
    pub radius: f64,
    pub pumping: f64,
    pub concentration: f64,
    /// Furrow side slope
    pub tan_alpha: f64,
    /// Maximum furrow water level
    pub max_level: f64,
    /// Wetland maximum elevation
    pub z_max: f64,
    pub pp: f64,
}

impl Default for Reservoir {
    fn default() -> Self {
        Reservoir {
            kind: ReservoirKind::Well,
            bottom: 0.0,
            initial_level: 0.0,
            radius: 0.0,
            pumping: 0.0,
            concentration: 0.0,
            tan_alpha: 0.0,
            max_level: 0.0,
            z_max: 0.0,
            pp: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Drains {
    /// Drains are simulated (`DrainF`)
    pub enabled: bool,
    /// Additional reduction in the correction factor
    pub correction: f64,
    pub effective_diameter: f64,
    /// Side of the square representing the drain in the mesh
    pub square: f64,
    pub drains: Vec<Drain>,
}

impl Default for Drains {
    fn default() -> Self {
        Drains {
            enabled: false,
            correction: 4.0,
            effective_diameter: 500.0,
            square: 4000.01,
            drains: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Drain {
    /// 1-based node number of the drain
    pub node: usize,
    /// 1-based numbers of the surrounding elements
    pub elements: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Atmosphere {
    /// Atmospheric boundary records are supplied (`AtmIn`)
    pub enabled: bool,
    /// Times the record set is repeated (`BC_Cycles`)
    pub cycles: i64,
    /// Maximum allowed pressure head at the soil surface (`hCritS`)
    pub h_crit_s: f64,
    pub records: Vec<Vec<f64>>,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Atmosphere {
            enabled: false,
            cycles: 1,
            h_crit_s: 0.0,
            records: Vec::new(),
        }
    }
}

/// Width of an atmospheric record.
pub const ATMOSPHERE_COLUMNS: usize = 18;

/// Rectangular domain with per-node and per-element initial state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Domain {
    /// Grid x coordinates, strictly increasing
    pub x: Vec<f64>,
    /// Grid z coordinates, strictly increasing
    pub z: Vec<f64>,
    /// In mesh order, top row first
    pub nodes: Vec<NodeState>,
    pub elements: Vec<ElementState>,
}

impl Default for Domain {
    fn default() -> Self {
        let x = (0..=10).map(|i| 100.0 * i as f64).collect::<Vec<_>>();
        let z = (0..=10).map(|i| 20.0 * i as f64).collect::<Vec<_>>();
        Domain {
            nodes: vec![NodeState::default(); x.len() * z.len()],
            elements: vec![ElementState::default(); 2 * (x.len() - 1) * (z.len() - 1)],
            x,
            z,
        }
    }
}

impl Domain {
    /// Replaces the grid, resetting every node to `node` and every element
    /// to the default state.
    pub fn set_grid(&mut self, x: Vec<f64>, z: Vec<f64>, node: NodeState) -> Result<()> {
        let mesh = mesh::generate(&x, &z)?;
        self.nodes = vec![node; mesh.node_count()];
        self.elements = vec![ElementState::default(); mesh.element_count()];
        self.x = x;
        self.z = z;
        Ok(())
    }

    pub fn mesh(&self) -> Result<Mesh> {
        mesh::generate(&self.x, &self.z)
    }

    pub fn node_count(&self) -> usize {
        self.x.len() * self.z.len()
    }

    pub fn element_count(&self) -> usize {
        2 * self.x.len().saturating_sub(1) * self.z.len().saturating_sub(1)
    }

    /// 1-based numbers of the nodes with a nonzero boundary code.
    pub fn boundary_nodes(&self) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.code != 0)
            .map(|(i, _)| i + 1)
            .collect()
    }

    /// Boundary length associated with a 1-based node: half the distance
    /// between the neighbouring grid columns.
    pub fn boundary_width(&self, node: usize) -> f64 {
        let nx = self.x.len();
        if nx < 2 || node == 0 {
            return 0.0;
        }
        let column = (node - 1) % nx;
        let (left, right) = if column == 0 {
            (0, 1)
        } else if column == nx - 1 {
            (nx - 2, nx - 1)
        } else {
            (column - 1, column + 1)
        };
        (self.x[right] - self.x[left]) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeState {
    /// Boundary code (`Code`), nonzero on boundary nodes
    pub code: i64,
    /// Initial pressure head
    pub head: f64,
    /// Prescribed recharge/discharge
    pub flux: f64,
    /// 1-based material number
    pub material: usize,
    /// Root water uptake distribution
    pub beta: f64,
    pub axz: f64,
    pub bxz: f64,
    pub dxz: f64,
    pub temperature: f64,
    /// One per solute
    pub concentrations: Vec<f64>,
    /// Solute boundary code (`KodCB`), used on boundary nodes
    pub solute_code: i64,
    /// Heat boundary code (`KodTB`), used on boundary nodes
    pub heat_code: i64,
}

impl Default for NodeState {
    fn default() -> Self {
        NodeState {
            code: 0,
            head: -100.0,
            flux: 0.0,
            material: 1,
            beta: 0.0,
            axz: 1.0,
            bxz: 1.0,
            dxz: 1.0,
            temperature: 20.0,
            concentrations: vec![0.0],
            solute_code: -1,
            heat_code: -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementState {
    /// Angle between K1 and the x axis, degrees
    pub angle: f64,
    pub anisotropy_1: f64,
    pub anisotropy_2: f64,
    /// Subregion number (`LayNum`)
    pub subregion: usize,
}

impl Default for ElementState {
    fn default() -> Self {
        ElementState {
            angle: 0.0,
            anisotropy_1: 1.0,
            anisotropy_2: 1.0,
            subregion: 1,
        }
    }
}

/// Array bounds written to the dimension file that are not derived from
/// table sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum bandwidth of matrix A (`MBandD`)
    pub bandwidth: i64,
    pub seepage_faces: i64,
    pub seepage_nodes: i64,
    /// Maximum elements surrounding one drain (`NElDrD`)
    pub drain_elements: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            bandwidth: 30,
            seepage_faces: 1,
            seepage_nodes: 1,
            drain_elements: 20,
        }
    }
}

impl Parameters {
    pub fn material_count(&self) -> usize {
        self.hydraulic.materials.len()
    }

    pub fn solute_count(&self) -> usize {
        self.solute.species.len()
    }

    /// Resizes every per-material table, new rows taking default values.
    pub fn set_material_count(&mut self, count: usize) {
        let model = self.hydraulic.effective_model();
        let material = Material::from_catalog(catalog::DEFAULT_TEXTURE, model).unwrap_or_default();
        self.hydraulic.materials.resize(count, material);
        self.solute.soil.resize(count, default_solute_soil());
        for species in self.solute.species.iter_mut() {
            species.reactions.resize(count, default_reactions());
        }
        self.heat.materials.resize(count, default_heat_material());
        self.root_uptake.feddes.poptm.resize(count, -25.0);
    }

    /// Resizes every per-solute table, new entries taking default values.
    pub fn set_solute_count(&mut self, count: usize) {
        let materials = self.material_count();
        let wc = self.solute.water_content_parameters;
        let mut species = Species::default();
        species.reactions = vec![default_reactions(); materials];
        species.water_content = vec![vec![0.0; wc]; 2];
        self.solute.species.resize(count, species);
        self.root_uptake.osmotic.resize(count, 1.0);
        for node in self.domain.nodes.iter_mut() {
            node.concentrations.resize(count, 0.0);
        }
    }

    /// Selects the transport module; `Standard` is the equilibrium model.
    pub fn set_transport(&mut self, transport: TransportModel) {
        self.solute.transport = transport;
    }

    /// Switching fumigant transport off also drops the additional injection.
    pub fn set_fumigant(&mut self, fumigant: bool) {
        self.solute.fumigant = fumigant;
        if !fumigant {
            self.solute.additional_fumigant = false;
        }
    }

    pub fn set_additional_fumigant(&mut self, injection: bool) -> Result<()> {
        if injection && !self.solute.fumigant {
            return Err(DeckError::config(
                "additional fumigant application requires fumigant transport",
            ));
        }
        self.solute.additional_fumigant = injection;
        Ok(())
    }

    /// Checks the invariants that do not depend on the deck layout.
    pub fn validate(&self) -> Result<()> {
        let general = &self.general;
        if general.heading.contains(|c: char| c == '\n' || c == '\r') {
            return Err(DeckError::config("heading must be a single line"));
        }
        if general.heading.ends_with(char::is_whitespace) {
            return Err(DeckError::config("heading must not end with whitespace"));
        }
        for unit in [&general.length_unit, &general.time_unit, &general.mass_unit].iter() {
            if unit.is_empty() || unit.contains(char::is_whitespace) {
                return Err(DeckError::config(format!("invalid unit {:?}", unit)));
            }
        }

        if self.material_count() == 0 {
            return Err(DeckError::config("at least one material is required"));
        }
        if let Some(material) = self
            .hydraulic
            .materials
            .iter()
            .find(|material| !single_spaced(&material.name))
        {
            return Err(DeckError::config(format!(
                "material name {:?} must be non-empty words separated by single spaces",
                material.name
            )));
        }
        if self.solute_count() == 0 {
            return Err(DeckError::config("at least one solute is required"));
        }

        self.validate_time()?;

        if self.solute.additional_fumigant && !self.solute.fumigant {
            return Err(DeckError::config(
                "additional fumigant application requires fumigant transport",
            ));
        }
        if self.root_uptake.enabled
            && self.root_uptake.active_uptake
            && !(self.solute.enabled && self.solute_count() == 1)
        {
            return Err(DeckError::config(
                "active solute uptake requires solute transport with a single solute",
            ));
        }
        if self.boundary.triggered_irrigation && ![-4, -3, 3].contains(&self.boundary.irrigation.kind)
        {
            return Err(DeckError::config(format!(
                "irrigation boundary type {} is not one of -4, -3, 3",
                self.boundary.irrigation.kind
            )));
        }

        self.validate_domain()
    }

    fn validate_time(&self) -> Result<()> {
        let time = &self.time;
        if !(time.t_init < time.t_max) {
            return Err(DeckError::config(format!(
                "initial time {} must precede final time {}",
                time.t_init, time.t_max
            )));
        }
        if !(time.dt_min <= time.dt && time.dt <= time.dt_max) {
            return Err(DeckError::config(format!(
                "time step {} outside [{}, {}]",
                time.dt, time.dt_min, time.dt_max
            )));
        }
        match time.print_times.first() {
            Some(first) if *first == time.t_init => {}
            _ => {
                return Err(DeckError::config(
                    "print times must start at the initial time",
                ))
            }
        }
        if time.print_times.windows(2).any(|w| w[1] < w[0]) {
            return Err(DeckError::config("print times must be non-decreasing"));
        }
        if time
            .print_times
            .iter()
            .any(|t| *t < time.t_init || *t > time.t_max)
        {
            return Err(DeckError::config(
                "print times must lie within the simulation period",
            ));
        }
        Ok(())
    }

    fn validate_domain(&self) -> Result<()> {
        let domain = &self.domain;
        mesh::check_axis("x", &domain.x)?;
        mesh::check_axis("z", &domain.z)?;

        let nodes = domain.node_count();
        let materials = self.material_count();
        if let Some(i) = domain
            .nodes
            .iter()
            .position(|node| node.material == 0 || node.material > materials)
        {
            return Err(DeckError::config(format!(
                "node {} references material {} of {}",
                i + 1,
                domain.nodes[i].material,
                materials
            )));
        }
        if let Some(i) = domain.elements.iter().position(|e| e.subregion == 0) {
            return Err(DeckError::config(format!(
                "element {} has subregion 0",
                i + 1
            )));
        }

        let boundary = &self.boundary;
        let drain_nodes = boundary.drains.drains.iter().map(|d| &d.node);
        if let Some(node) = boundary
            .observation_nodes
            .iter()
            .chain(drain_nodes)
            .find(|n| **n == 0 || **n > nodes)
        {
            return Err(DeckError::config(format!(
                "node number {} outside 1..={}",
                node, nodes
            )));
        }
        let limit = self.limits.drain_elements;
        if let Some(drain) = boundary
            .drains
            .drains
            .iter()
            .find(|d| d.elements.len() > limit)
        {
            return Err(DeckError::config(format!(
                "drain at node {} has {} elements, limit is {}",
                drain.node,
                drain.elements.len(),
                limit
            )));
        }
        Ok(())
    }
}

/// Material names end a row and read back as their words joined by single
/// spaces.
fn single_spaced(text: &str) -> bool {
    !text.is_empty() && text.split_whitespace().collect::<Vec<_>>().join(" ") == text
}

#[cfg(test)]
mod test {
    use {super::*, std::fs::File};

    #[test]
    fn defaults() {
        assert_eq!(
            Parameters::default(),
            serde_yaml::from_reader::<_, Parameters>(
                File::open("src/testdata/defaults.yaml").unwrap()
            )
            .unwrap()
        );
    }

    #[test]
    fn default_is_valid() {
        Parameters::default().validate().unwrap();
    }

    #[test]
    fn material_columns_follow_variant() {
        let mut hydraulic = Hydraulic::default();
        assert_eq!(hydraulic.material_columns(), 7);

        hydraulic.set_model(HydraulicModel::ModifiedVanGenuchten);
        assert_eq!(hydraulic.material_columns(), 11);
        assert_eq!(hydraulic.materials[0].params.len(), 10);
    }

    #[test]
    fn hysteresis_forces_hysteretic_variant() {
        let mut hydraulic = Hydraulic::default();
        hydraulic.set_hysteresis(Hysteresis::Retention);

        assert_eq!(hydraulic.model(), HydraulicModel::VanGenuchten);
        assert_eq!(hydraulic.effective_model(), HydraulicModel::Hysteretic);
        assert_eq!(hydraulic.material_columns(), 11);
        assert_eq!(
            hydraulic.materials[0].params,
            catalog::soil("Loam", HydraulicModel::Hysteretic).unwrap()
        );
    }

    #[test]
    fn hysteresis_with_any_nominal_model() {
        let mut hydraulic = Hydraulic::default();
        hydraulic.set_model(HydraulicModel::DurnerDualPorosity);
        hydraulic.set_hysteresis(Hysteresis::Lenhard);

        assert_eq!(hydraulic.model(), HydraulicModel::DurnerDualPorosity);
        assert_eq!(hydraulic.effective_model(), HydraulicModel::Hysteretic);
        assert_eq!(hydraulic.material_columns(), 11);

        hydraulic.set_hysteresis(Hysteresis::Disabled);
        assert_eq!(hydraulic.effective_model(), HydraulicModel::DurnerDualPorosity);
        assert_eq!(hydraulic.material_columns(), 10);
    }

    #[test]
    fn material_names_are_single_line_words() {
        let mut params = Parameters::default();
        params.hydraulic.materials[0].name = "Silty Clay Loam".to_owned();
        params.validate().unwrap();

        for name in ["Loam\n*** BLOCK C", " Loam", "Loam ", "Sandy  Loam", "Sandy\tLoam", ""].iter() {
            params.hydraulic.materials[0].name = (*name).to_owned();
            assert!(
                matches!(params.validate(), Err(DeckError::Config(_))),
                "{:?}",
                name
            );
        }
    }

    #[test]
    fn heading_is_one_line_without_trailing_space() {
        let mut params = Parameters::default();
        params.general.heading = "  indented heading".to_owned();
        params.validate().unwrap();

        params.general.heading = "heading\r".to_owned();
        assert!(params.validate().is_err());
        params.general.heading = "heading ".to_owned();
        assert!(params.validate().is_err());
    }

    #[test]
    fn additional_fumigant_requires_fumigant() {
        let mut params = Parameters::default();
        assert!(params.set_additional_fumigant(true).is_err());

        params.set_fumigant(true);
        params.set_additional_fumigant(true).unwrap();
        params.set_fumigant(false);
        assert!(!params.solute.additional_fumigant);
    }

    #[test]
    fn print_times_span_period() {
        let mut time = Time::default();
        time.t_max = 30.0;
        time.set_print_count(3);
        assert_eq!(time.print_times, vec![0.0, 10.0, 20.0, 30.0]);
        assert_eq!(time.print_count(), 3);
    }

    #[test]
    fn print_times_must_start_at_initial_time() {
        let mut params = Parameters::default();
        params.time.print_times = vec![0.5, 1.0];
        assert!(matches!(params.validate(), Err(DeckError::Config(_))));

        params.time.print_times = vec![0.0, 1.0, 0.5];
        assert!(params.validate().is_err());
    }

    #[test]
    fn resizing_materials_extends_dependent_tables() {
        let mut params = Parameters::default();
        params.set_material_count(3);

        assert_eq!(params.solute.soil.len(), 3);
        assert_eq!(params.solute.species[0].reactions.len(), 3);
        assert_eq!(params.heat.materials.len(), 3);
        assert_eq!(params.root_uptake.feddes.poptm.len(), 3);
    }

    #[test]
    fn boundary_widths_use_neighbouring_columns() {
        let mut domain = Domain::default();
        domain
            .set_grid(
                vec![0.0, 10.0, 30.0, 60.0],
                vec![0.0, 5.0],
                NodeState::default(),
            )
            .unwrap();

        assert_eq!(domain.boundary_width(1), 5.0);
        assert_eq!(domain.boundary_width(2), 15.0);
        assert_eq!(domain.boundary_width(3), 25.0);
        assert_eq!(domain.boundary_width(4), 15.0);
        assert_eq!(domain.boundary_width(5), 5.0);
    }

    #[test]
    fn active_uptake_needs_single_solute() {
        let mut params = Parameters::default();
        params.root_uptake.enabled = true;
        params.root_uptake.active_uptake = true;
        assert!(params.validate().is_err());

        params.solute.enabled = true;
        params.validate().unwrap();

        params.set_solute_count(2);
        assert!(params.validate().is_err());
    }
}
