use crate::parameters::{
    HydraulicModel, Hysteresis, Parameters, ReservoirKind, RootDepthEntry, RootZoneShape,
    TransportModel, UptakeModel,
};

/// Switches that decide which sections of the deck exist and how they are
/// laid out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureFlags {
    /// Model governing the material table
    pub model: HydraulicModel,
    pub hysteresis: bool,

    pub solute: bool,
    pub bacteria: bool,
    pub filtration: bool,
    pub temperature_dependent: bool,
    pub water_content_dependent: bool,
    pub fumigant: bool,
    pub additional_fumigant: bool,

    pub heat: bool,

    pub root_uptake: bool,
    pub uptake_model: UptakeModel,
    pub solute_reduction: bool,
    /// Salinity stress is multiplicative, selecting the `c50`/`p3c` layout
    pub multiplicative: bool,
    pub active_uptake: bool,

    pub root_growth: bool,
    pub zone_shape: RootZoneShape,
    pub depth_entry: RootDepthEntry,
    pub horizontal: bool,

    pub gradient: bool,
    pub subsurface_drip: bool,
    pub surface_drip: bool,
    pub seepage_face: bool,
    pub triggered_irrigation: bool,
    pub reservoir: bool,
    pub reservoir_kind: ReservoirKind,
    pub drains: bool,

    pub atmosphere: bool,
}

impl FeatureFlags {
    pub fn of(params: &Parameters) -> Self {
        let solute = &params.solute;
        let uptake = &params.root_uptake;
        let growth = &params.root_growth;
        let boundary = &params.boundary;

        FeatureFlags {
            model: params.hydraulic.effective_model(),
            hysteresis: params.hydraulic.hysteresis() != Hysteresis::Disabled,

            solute: solute.enabled,
            bacteria: solute.bacteria,
            filtration: solute.filtration,
            temperature_dependent: solute.temperature_dependent,
            water_content_dependent: solute.water_content_dependent,
            fumigant: solute.fumigant,
            additional_fumigant: solute.fumigant && solute.additional_fumigant,

            heat: params.heat.enabled,

            root_uptake: uptake.enabled,
            uptake_model: uptake.model,
            solute_reduction: uptake.solute_reduction,
            multiplicative: uptake.solute_reduction && !uptake.additive,
            active_uptake: uptake.active_uptake,

            root_growth: growth.enabled,
            zone_shape: growth.zone_shape,
            depth_entry: growth.depth_entry,
            horizontal: growth.horizontal,

            gradient: boundary.gradient,
            subsurface_drip: boundary.subsurface_drip,
            surface_drip: boundary.surface_drip,
            seepage_face: boundary.seepage_face,
            triggered_irrigation: boundary.triggered_irrigation,
            reservoir: boundary.reservoir,
            reservoir_kind: boundary.well.kind,
            drains: boundary.drains.enabled,

            atmosphere: params.atmosphere.enabled,
        }
    }

    /// `lEquil`: equilibrium transport is the standard transport module.
    pub fn equilibrium(transport: TransportModel) -> bool {
        transport == TransportModel::Standard
    }
}

/// Table sizes declared in the deck.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Counts {
    pub materials: usize,
    pub solutes: usize,
    /// `MPL`
    pub print_times: usize,
    pub nodes: usize,
    pub elements: usize,
    pub boundary_nodes: usize,
    pub observation_nodes: usize,
    pub plants: usize,
    /// Rows of the root depth table (`nGrowth`)
    pub growth_rows: usize,
    /// `nParamWC`
    pub water_content_parameters: usize,
    /// Elements surrounding each drain (`NElD`)
    pub drain_elements: Vec<usize>,
    /// `MaxAL`
    pub atmosphere_records: usize,
}

impl Counts {
    pub fn of(params: &Parameters) -> Self {
        Counts {
            materials: params.material_count(),
            solutes: params.solute_count(),
            print_times: params.time.print_count(),
            nodes: params.domain.node_count(),
            elements: params.domain.element_count(),
            boundary_nodes: params.domain.boundary_nodes().len(),
            observation_nodes: params.boundary.observation_nodes.len(),
            plants: params.root_growth.plants,
            growth_rows: params.root_growth.depth_table.len(),
            water_content_parameters: params.solute.water_content_parameters,
            drain_elements: params
                .boundary
                .drains
                .drains
                .iter()
                .map(|drain| drain.elements.len())
                .collect(),
            atmosphere_records: params.atmosphere.records.len(),
        }
    }

    /// `NDr`
    pub fn drains(&self) -> usize {
        self.drain_elements.len()
    }
}

#[cfg(test)]
mod test {
    use {super::*, crate::parameters::NodeState};

    #[test]
    fn hysteresis_forces_model() {
        let mut params = Parameters::default();
        assert!(!FeatureFlags::of(&params).hysteresis);

        params
            .hydraulic
            .set_hysteresis(Hysteresis::RetentionConductivity);
        let flags = FeatureFlags::of(&params);
        assert!(flags.hysteresis);
        assert_eq!(flags.model, HydraulicModel::Hysteretic);
    }

    #[test]
    fn additional_fumigant_follows_fumigant() {
        let mut params = Parameters::default();
        params.solute.additional_fumigant = true;
        assert!(!FeatureFlags::of(&params).additional_fumigant);
    }

    #[test]
    fn multiplicative_needs_reduction() {
        let mut params = Parameters::default();
        params.root_uptake.additive = false;
        assert!(!FeatureFlags::of(&params).multiplicative);

        params.root_uptake.solute_reduction = true;
        assert!(FeatureFlags::of(&params).multiplicative);
    }

    #[test]
    fn counts_follow_tables() {
        let mut params = Parameters::default();
        params.domain.nodes[0] = NodeState {
            code: 1,
            ..NodeState::default()
        };
        params.domain.nodes[5].code = -4;
        params.time.set_print_count(4);

        let counts = Counts::of(&params);
        assert_eq!(counts.nodes, 121);
        assert_eq!(counts.elements, 200);
        assert_eq!(counts.boundary_nodes, 2);
        assert_eq!(counts.print_times, 4);
        assert_eq!(counts.drains(), 0);
    }
}
