use {
    super::{cursor::LineCursor, format::parse_token, Block, Value},
    crate::{
        error::{DeckError, ParseErrorKind, Result},
        mesh::{self, grid_axes},
        parameters::{
            DomainType, Drain, ElementState, HydraulicModel, Hysteresis, InitialBranch, Material,
            NodeState, Parameters, ReservoirKind, RootDepthEntry, RootZoneShape, TransportModel,
            UptakeModel,
        },
        schema::{
            resolve_section, Counts, DeckFile, FeatureFlags, Field, FieldKind, Record, Section,
            SectionId,
        },
    },
    log::{debug, info, warn},
    ndarray::Array2,
    std::{collections::HashMap, convert::TryFrom, fs, path::Path},
};

/// Reads the deck in `dir` back into a configuration.
///
/// Files are read in deck order and every section is laid out from the
/// flags and counts decoded before it. The result is validated like a
/// configuration about to be written; a failure is reported at the last
/// line read.
pub fn read_deck<P: AsRef<Path>>(dir: P) -> Result<Parameters> {
    let dir = dir.as_ref();
    info!("Reading deck from {}", dir.display());

    let mut decoder = Decoder::default();
    let mut last = None;
    for file in DeckFile::ALL.iter().copied() {
        let ids = SectionId::ALL
            .iter()
            .copied()
            .filter(|id| id.file() == file)
            .collect::<Vec<_>>();

        let flags = FeatureFlags::of(&decoder.params);
        if !ids
            .iter()
            .any(|id| resolve_section(*id, &flags, &decoder.counts).is_present())
        {
            debug!("Skipping {}", file);
            continue;
        }

        let path = dir.join(file.file_name());
        let text = fs::read_to_string(&path).map_err(|e| DeckError::io(&path, e))?;
        let mut cursor = LineCursor::new(file, &text);
        if let Some(version) = file.version() {
            cursor.expect_version(version)?;
        }

        for id in ids {
            let section = resolve_section(id, &FeatureFlags::of(&decoder.params), &decoder.counts);
            if section.is_present() {
                decoder.read_section(&mut cursor, &section)?;
                debug!("Read section {}", id);
            }
        }

        let remaining = cursor.remaining();
        if remaining > 0 {
            warn!("{} has {} unread lines", file, remaining);
        }
        last = Some((file, cursor.line()));
    }

    decoder.params.validate().map_err(|e| match (e, last) {
        (DeckError::Config(message), Some((file, line))) => DeckError::Parse {
            file,
            line,
            kind: ParseErrorKind::Inconsistent(message),
        },
        (e, _) => e,
    })?;

    info!("Read deck from {}", dir.display());
    Ok(decoder.params)
}

/// Reads one line and converts its tokens to the kinds of `fields`. A
/// trailing label takes whatever text follows the numeric tokens.
fn read_row(cursor: &mut LineCursor, name: &'static str, fields: &[Field]) -> Result<Vec<Value>> {
    let line = cursor.next_line(name)?;
    let tokens = line.split_whitespace().collect::<Vec<_>>();
    let numeric = fields
        .iter()
        .filter(|field| field.kind != FieldKind::Label)
        .collect::<Vec<_>>();
    let labelled = numeric.len() < fields.len();

    if tokens.len() < numeric.len() || (!labelled && tokens.len() > numeric.len()) {
        return Err(cursor.error(ParseErrorKind::TokenCount {
            record: name,
            expected: numeric.len(),
            found: tokens.len(),
        }));
    }

    let mut values = tokens
        .iter()
        .zip(&numeric)
        .map(|(token, field)| parse_token(token, field).map_err(|kind| cursor.error(kind)))
        .collect::<Result<Vec<_>>>()?;
    if labelled {
        values.push(Value::Text(tokens[numeric.len()..].join(" ")));
    }
    Ok(values)
}

fn read_record(cursor: &mut LineCursor, record: &Record) -> Result<Block> {
    match record {
        Record::Marker(marker) => {
            cursor.expect_marker(marker)?;
            Ok(Vec::new())
        }
        Record::Text(name) => {
            let line = cursor.next_line(name)?;
            Ok(vec![vec![Value::Text(line.to_owned())]])
        }
        Record::Row { name, fields } => Ok(vec![read_row(cursor, *name, fields)?]),
        Record::Table { name, rows, fields } => (0..*rows)
            .map(|_| read_row(cursor, *name, fields))
            .collect(),
        Record::Wrapped {
            name, field, count, ..
        } => {
            let mut values = Vec::with_capacity(*count);
            loop {
                let line = cursor.next_line(name)?;
                let tokens = line.split_whitespace().collect::<Vec<_>>();
                if values.len() + tokens.len() > *count {
                    return Err(cursor.error(ParseErrorKind::TokenCount {
                        record: *name,
                        expected: *count,
                        found: values.len() + tokens.len(),
                    }));
                }
                for token in tokens {
                    values.push(parse_token(token, field).map_err(|kind| cursor.error(kind))?);
                }
                if values.len() == *count {
                    break;
                }
            }
            Ok(vec![values])
        }
    }
}

fn inconsistent<S: Into<String>>(cursor: &LineCursor, message: S) -> DeckError {
    cursor.error(ParseErrorKind::Inconsistent(message.into()))
}

fn variant<T>(
    cursor: &LineCursor,
    field: &'static str,
    value: i64,
    from_id: fn(i64) -> Option<T>,
) -> Result<T> {
    from_id(value).ok_or_else(|| cursor.error(ParseErrorKind::UnknownVariant { field, value }))
}

fn count(cursor: &LineCursor, field: &'static str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| {
        cursor.error(ParseErrorKind::InvalidToken {
            field,
            expected: "non-negative integer",
            token: value.to_string(),
        })
    })
}

/// Typed access to the values of one decoded row.
struct Fields<'a>(&'a [Value]);

impl<'a> Fields<'a> {
    fn int(&self, i: usize) -> i64 {
        self.0.get(i).and_then(Value::as_int).unwrap_or_default()
    }

    fn real(&self, i: usize) -> f64 {
        self.0.get(i).and_then(Value::as_float).unwrap_or_default()
    }

    fn flag(&self, i: usize) -> bool {
        self.0.get(i).and_then(Value::as_bool).unwrap_or_default()
    }

    fn text(&self, i: usize) -> &'a str {
        self.0.get(i).and_then(Value::as_text).unwrap_or_default()
    }

    fn reals(&self, from: usize) -> Vec<f64> {
        self.0
            .iter()
            .skip(from)
            .filter_map(Value::as_float)
            .collect()
    }

    fn ints(&self) -> Vec<i64> {
        self.0.iter().filter_map(Value::as_int).collect()
    }
}

fn table(block: &Block) -> Vec<Vec<f64>> {
    block.iter().map(|row| Fields(row).reals(0)).collect()
}

/// Configuration under construction together with the values that only
/// become meaningful once a later file has been read.
#[derive(Default)]
struct Decoder {
    params: Parameters,
    counts: Counts,
    /// `lEquil` as written in the main flags
    equilibrium: Option<bool>,
    /// Flat `(x, z)` pairs of the mesh file
    mesh_nodes: Vec<f64>,
    /// Flat 1-based triangles of the mesh file
    mesh_elements: Vec<usize>,
    boundary: Vec<usize>,
    solute_codes: Vec<i64>,
    heat_codes: Vec<i64>,
}

impl Decoder {
    fn read_section(&mut self, cursor: &mut LineCursor, section: &Section) -> Result<()> {
        let mut occurrences = HashMap::new();
        for record in section.records() {
            let block = read_record(cursor, record)?;
            if let Some(name) = record.name() {
                let index = occurrences.entry(name).or_insert(0);
                self.decode(cursor, section.id, name, *index, &block)?;
                *index += 1;
            }
        }
        Ok(())
    }

    fn decode(
        &mut self,
        cursor: &LineCursor,
        section: SectionId,
        name: &'static str,
        index: usize,
        block: &Block,
    ) -> Result<()> {
        let row = Fields(block.first().map(Vec::as_slice).unwrap_or(&[]));
        let p = &mut self.params;

        match name {
            // Selector.in
            "Heading" => p.general.heading = row.text(0).to_owned(),
            "LUnit" => p.general.length_unit = row.text(0).trim().to_owned(),
            "TUnit" => p.general.time_unit = row.text(0).trim().to_owned(),
            "MUnit" => p.general.mass_unit = row.text(0).trim().to_owned(),
            "Kat" => p.general.domain_type = variant(cursor, "Kat", row.int(0), DomainType::from_id)?,
            "MaxIt" => {
                let iteration = &mut p.iteration;
                iteration.max_iterations = row.int(0);
                iteration.water_content_tolerance = row.real(1);
                iteration.pressure_head_tolerance = row.real(2);
                iteration.initial_pressure_head = row.flag(3);
            }
            "lWat" => {
                p.general.water_flow = row.flag(0);
                p.solute.enabled = row.flag(1);
                p.root_uptake.enabled = row.flag(2);
                p.output.short = row.flag(3);
                p.output.interval = row.flag(4);
                p.output.screen = row.flag(5);
                p.atmosphere.enabled = row.flag(6);
                p.heat.enabled = row.flag(7);
                p.hydraulic.temperature_dependent = row.flag(8);
                self.equilibrium = Some(row.flag(9));
                p.general.external_mesh = row.flag(10);
                p.general.inverse = row.flag(11);
            }
            "lUnsatCh" => {
                let transport = if row.flag(0) {
                    TransportModel::UnsatChem
                } else if row.flag(1) {
                    TransportModel::ColloidFacilitated
                } else if row.flag(2) {
                    TransportModel::Hp2
                } else {
                    TransportModel::Standard
                };
                p.set_transport(transport);
                if let Some(equilibrium) = self.equilibrium {
                    if equilibrium != FeatureFlags::equilibrium(transport) {
                        warn!(
                            "lEquil is {} but the transport module is {:?}",
                            equilibrium, transport
                        );
                    }
                }
                p.root_uptake.active_uptake = row.flag(3);
                p.root_growth.enabled = row.flag(4);
            }
            "PrintStep" => {
                p.output.print_step = row.int(0);
                p.output.print_interval = row.real(1);
                p.output.press_enter = row.flag(2);
            }
            "NMat" => {
                let materials = count(cursor, "NMat", row.int(0))?;
                p.set_material_count(materials);
                self.counts.materials = materials;
                p.hydraulic.subregions = count(cursor, "NLay", row.int(1))?;
                p.hydraulic.h_tab_min = row.real(2);
                p.hydraulic.h_tab_max = row.real(3);
            }
            "Model" => {
                let model = variant(cursor, "Model", row.int(0), HydraulicModel::from_id)?;
                let hysteresis = variant(cursor, "Hysteresis", row.int(1), Hysteresis::from_id)?;
                p.hydraulic.set_model(model);
                p.hydraulic.set_hysteresis(hysteresis);
            }
            "iKappa" => {
                p.hydraulic.initial_branch =
                    variant(cursor, "iKappa", row.int(0), InitialBranch::from_id)?
            }
            "materials" => {
                p.hydraulic.materials = block
                    .iter()
                    .enumerate()
                    .map(|(i, values)| {
                        let fields = Fields(values);
                        let name = values.iter().find_map(Value::as_text).unwrap_or_default();
                        Material {
                            name: if name.is_empty() {
                                format!("Material {}", i + 1)
                            } else {
                                name.to_owned()
                            },
                            params: fields.reals(0),
                        }
                    })
                    .collect()
            }
            "dt" => {
                p.time.dt = row.real(0);
                p.time.dt_min = row.real(1);
                p.time.dt_max = row.real(2);
                p.iteration.dmul = row.real(3);
                p.iteration.dmul2 = row.real(4);
                p.iteration.it_min = row.int(5);
                p.iteration.it_max = row.int(6);
                self.counts.print_times = count(cursor, "MPL", row.int(7))?;
            }
            "tInit" => {
                p.time.t_init = row.real(0);
                p.time.t_max = row.real(1);
            }
            "TPrint" => {
                p.time.print_times = Some(p.time.t_init)
                    .into_iter()
                    .chain(row.reals(0))
                    .collect()
            }

            "Epsi" => {
                let solute = &mut p.solute;
                solute.epsi = row.real(0);
                solute.upstream = row.flag(1);
                solute.artificial_dispersion = row.flag(2);
                solute.temperature_dependent = row.flag(3);
                solute.abs_tolerance = row.real(4);
                solute.rel_tolerance = row.real(5);
                solute.max_iterations = row.int(6);
                solute.peclet_courant = row.real(7);
                solute.tortuosity = row.flag(9);
                solute.bacteria = row.flag(10);
                solute.filtration = row.flag(11);
                let solutes = count(cursor, "NS", row.int(8))?;
                p.set_solute_count(solutes);
                self.counts.solutes = solutes;
            }
            "lWatDep" => {
                p.solute.water_content_dependent = row.flag(0);
                p.solute.initial_total_mass = row.flag(1);
                p.solute.initial_equilibrium = row.flag(2);
                p.solute.moldrup_tortuosity = row.flag(3);
                p.set_fumigant(row.flag(4));
            }
            "solute_soil" => p.solute.soil = table(block),
            "DifW" => {
                if let Some(species) = p.solute.species.get_mut(index) {
                    species.diffusion_water = row.real(0);
                    species.diffusion_gas = row.real(1);
                }
            }
            "reactions" => {
                if let Some(species) = p.solute.species.get_mut(index) {
                    species.reactions = table(block);
                }
            }
            "temperature_diffusion" => {
                for (species, values) in p.solute.species.iter_mut().zip(block) {
                    species.temperature_diffusion = Fields(values).reals(0);
                }
            }
            "temperature_reactions" => {
                for (species, values) in p.solute.species.iter_mut().zip(block) {
                    species.temperature_reactions = Fields(values).reals(0);
                }
            }
            "cBnd" => {
                for (species, values) in p.solute.species.iter_mut().zip(block) {
                    species.boundary = Fields(values).reals(0);
                }
            }
            "tPulse" => p.solute.pulse_duration = row.real(0),
            "AddFumigant" => p.solute.additional_fumigant = row.flag(0),
            "AddFumTime" => {
                p.solute.injection.time = row.real(0);
                p.solute.injection.mass = row.real(1);
            }
            "AddFumMinX" => {
                let injection = &mut p.solute.injection;
                injection.min_x = row.real(0);
                injection.max_x = row.real(1);
                injection.min_z = row.real(2);
                injection.max_z = row.real(3);
            }
            "nParamWC" => {
                let parameters = count(cursor, "nParamWC", row.int(0))?;
                p.solute.water_content_parameters = parameters;
                self.counts.water_content_parameters = parameters;
            }
            "water_content" => {
                if let Some(species) = p.solute.species.get_mut(index) {
                    species.water_content = table(block);
                }
            }

            "heat" => p.heat.materials = table(block),
            "TTop" => p.heat.boundary = row.reals(0),
            "tAmpl" => {
                p.heat.amplitude = row.real(0);
                p.heat.period = row.real(1);
            }

            "iModel" => {
                p.root_uptake.model = variant(cursor, "iModel", row.int(0), UptakeModel::from_id)?;
                p.root_uptake.critical_stress = row.real(1);
            }
            "P0" => {
                let feddes = &mut p.root_uptake.feddes;
                feddes.p0 = row.real(0);
                feddes.p2h = row.real(1);
                feddes.p2l = row.real(2);
                feddes.p3 = row.real(3);
                feddes.r2h = row.real(4);
                feddes.r2l = row.real(5);
            }
            "POptm" => p.root_uptake.feddes.poptm = row.reals(0),
            "P50" => {
                let s_shape = &mut p.root_uptake.s_shape;
                s_shape.p50 = row.real(0);
                s_shape.p3 = row.real(1);
                s_shape.pw = row.real(2);
            }
            "SoluteReduction" => p.root_uptake.solute_reduction = row.flag(0),
            "Additive" => p.root_uptake.additive = row.flag(0),
            "aOsm" => {
                let uptake = &mut p.root_uptake;
                let mut at = 0;
                if uptake.solute_reduction && !uptake.additive {
                    uptake.c50 = row.real(0);
                    uptake.p3c = row.real(1);
                    at = 2;
                }
                let solutes = self.counts.solutes;
                uptake.osmotic = (at..at + solutes).map(|i| row.real(i)).collect();
                uptake.s_shaped_salinity = row.int(at + solutes) != 0;
            }
            "OmegaS" => {
                let active = &mut p.root_uptake.active;
                active.omega_s = row.real(0);
                active.s_pot = row.real(1);
                active.km = row.real(2);
                active.c_min = row.real(3);
                active.omega_w = row.flag(4);
            }

            "iRootZoneShape" => {
                let growth = &mut p.root_growth;
                growth.zone_shape =
                    variant(cursor, "iRootZoneShape", row.int(0), RootZoneShape::from_id)?;
                growth.depth_entry =
                    variant(cursor, "iRootDepthEntry", row.int(1), RootDepthEntry::from_id)?;
            }
            "Horizontal" => {
                p.root_growth.horizontal = row.flag(0);
                p.root_growth.plants = count(cursor, "NPlants", row.int(1))?;
                self.counts.plants = p.root_growth.plants;
            }
            "rZm" => {
                let vrugt = &mut p.root_growth.vrugt;
                vrugt.zm = row.real(0);
                vrugt.z0 = row.real(1);
                vrugt.a = row.real(2);
            }
            "rRm" => {
                let growth = &mut p.root_growth;
                growth.vrugt.rm = row.real(0);
                growth.vrugt.r0 = row.real(1);
                growth.vrugt.b = row.real(2);
                growth.centers = row.reals(3);
            }
            "RootDepth" => p.root_growth.depth = row.real(0),
            "RootHalfWidth" => {
                // both sides carry the same half width
                p.root_growth.half_width = row.real(0);
                p.root_growth.centers = row.reals(2);
            }
            "rCenter" => {
                if p.root_growth.horizontal {
                    p.root_growth.centers = row.reals(0);
                }
            }
            "nGrowth" => self.counts.growth_rows = count(cursor, "nGrowth", row.int(0))?,
            "growth_table" => p.root_growth.depth_table = table(block),
            "iRFak" => {
                let growth = &mut p.root_growth.growth;
                growth.factor = row.int(0);
                growth.t_min = row.real(1);
                growth.t_med = row.real(2);
                growth.t_max = row.real(3);
                growth.period = row.real(4);
            }
            "ZRMin" => {
                let growth = &mut p.root_growth.growth;
                growth.z_min = row.real(0);
                growth.z_med = row.real(1);
                growth.z_max = row.real(2);
            }
            "rRMin" => {
                p.root_growth.growth.r_min = row.real(0);
                p.root_growth.growth.r_max = row.real(1);
            }

            // Dimensio.in
            "NumNPD" => {
                self.counts.nodes = count(cursor, "NumNPD", row.int(0))?;
                self.counts.elements = count(cursor, "NumElD", row.int(1))?;
                self.counts.boundary_nodes = count(cursor, "NumBPD", row.int(2))?;
                p.limits.bandwidth = row.int(3);
                p.limits.seepage_faces = row.int(4);
                p.limits.seepage_nodes = row.int(5);
                p.limits.drain_elements = count(cursor, "NElDrD", row.int(7))?;
                self.counts.observation_nodes = count(cursor, "NObsD", row.int(9))?;

                let materials = count(cursor, "NMatD", row.int(8))?;
                if materials != self.counts.materials {
                    return Err(inconsistent(
                        cursor,
                        format!(
                            "{} materials declared, Selector.in has {}",
                            materials, self.counts.materials
                        ),
                    ));
                }
                let solutes = count(cursor, "NSD", row.int(10))?;
                if p.solute.enabled {
                    if solutes != self.counts.solutes {
                        return Err(inconsistent(
                            cursor,
                            format!(
                                "{} solutes declared, Selector.in has {}",
                                solutes, self.counts.solutes
                            ),
                        ));
                    }
                } else if solutes == 0 {
                    return Err(inconsistent(cursor, "at least one solute must be declared"));
                } else {
                    p.set_solute_count(solutes);
                    self.counts.solutes = solutes;
                }
            }

            // Meshtria.txt
            "mesh_header" => {
                let (nodes, elements) = (row.int(1), row.int(3));
                if nodes != self.counts.nodes as i64 || elements != self.counts.elements as i64 {
                    return Err(inconsistent(
                        cursor,
                        format!(
                            "mesh has {} nodes and {} elements, Dimensio.in declares {} and {}",
                            nodes, elements, self.counts.nodes, self.counts.elements
                        ),
                    ));
                }
            }
            "mesh_nodes" => {
                self.mesh_nodes.clear();
                for (i, values) in block.iter().enumerate() {
                    let fields = Fields(values);
                    if fields.int(0) != i as i64 + 1 {
                        return Err(inconsistent(
                            cursor,
                            format!("node {} is numbered {}", i + 1, fields.int(0)),
                        ));
                    }
                    self.mesh_nodes.push(fields.real(1));
                    self.mesh_nodes.push(fields.real(2));
                }
            }
            "mesh_elements" => {
                self.mesh_elements.clear();
                for values in block {
                    for node in Fields(values).ints().into_iter().skip(1) {
                        self.mesh_elements.push(count(cursor, "element node", node)?);
                    }
                }
                self.check_mesh(cursor)?;
            }

            // Boundary.in
            "NumBP" => {
                let boundary_nodes = count(cursor, "NumBP", row.int(0))?;
                let observation_nodes = count(cursor, "NObs", row.int(1))?;
                if boundary_nodes != self.counts.boundary_nodes
                    || observation_nodes != self.counts.observation_nodes
                {
                    return Err(inconsistent(
                        cursor,
                        format!(
                            "{} boundary and {} observation nodes, Dimensio.in declares {} and {}",
                            boundary_nodes,
                            observation_nodes,
                            self.counts.boundary_nodes,
                            self.counts.observation_nodes
                        ),
                    ));
                }
                let boundary = &mut p.boundary;
                boundary.seepage_faces = row.flag(2);
                boundary.free_drainage = row.flag(3);
                boundary.drains.enabled = row.flag(4);
                boundary.discharge_level = row.flag(5);
            }
            "Interp" => {
                let boundary = &mut p.boundary;
                boundary.interpolate = row.flag(0);
                boundary.head_to_flux = row.flag(1);
                boundary.head_to_zero_flux = row.flag(2);
                boundary.atmospheric_head = row.flag(3);
                boundary.seepage_head_switch = row.flag(4);
                boundary.atmospheric_level = row.flag(5);
                boundary.atmospheric_flux = row.flag(6);
                boundary.snow = row.flag(7);
            }
            "Gradient" => {
                let boundary = &mut p.boundary;
                boundary.gradient = row.flag(0);
                boundary.subsurface_drip = row.flag(1);
                boundary.surface_drip = row.flag(2);
                boundary.seepage_face = row.flag(3);
                boundary.triggered_irrigation = row.flag(4);
                boundary.reservoir = row.flag(5);
            }
            "Grad" => p.boundary.gradient_value = row.real(0),
            "QDrip" => {
                p.boundary.drip.flux = row.real(0);
                p.boundary.drip.exponent = row.real(1);
            }
            "iDripCenter" => {
                p.boundary.surface.center = row.int(0);
                p.boundary.surface.direction = row.int(1);
            }
            "hSeep" => p.boundary.seepage_head = row.real(0),
            "iIrrig" => {
                let irrigation = &mut p.boundary.irrigation;
                irrigation.node = row.int(0);
                irrigation.head = row.real(1);
                irrigation.kind = row.int(2);
                irrigation.rate = row.real(3);
                irrigation.duration = row.real(4);
                irrigation.lag = row.real(5);
            }
            "iWell" => {
                p.boundary.well.kind = variant(cursor, "iWell", row.int(0), ReservoirKind::from_id)?
            }
            "zWBot" => {
                let well = &mut p.boundary.well;
                well.bottom = row.real(0);
                well.initial_level = row.real(1);
                well.radius = row.real(2);
                well.pumping = row.real(3);
                well.concentration = row.real(4);
                match well.kind {
                    ReservoirKind::Well => {}
                    ReservoirKind::Furrow => {
                        well.tan_alpha = row.real(5);
                        well.max_level = row.real(6);
                    }
                    ReservoirKind::Wetland => {
                        well.z_max = row.real(5);
                        well.pp = row.real(6);
                    }
                }
            }
            "nNode" => {
                self.boundary = self.node_numbers(cursor, "nNode", &row.ints())?;
            }
            "Width" => {
                for (node, width) in self.boundary.iter().zip(row.reals(0)) {
                    let expected = p.domain.boundary_width(*node);
                    if (expected - width).abs() > 1e-9 * expected.abs().max(1.0) {
                        warn!(
                            "boundary node {} has width {}, the grid gives {}",
                            node, width, expected
                        );
                    }
                }
            }
            "L_surf" => p.boundary.transpiration_length = row.real(0),
            "Obs_nodes" => {
                let nodes = self.node_numbers(cursor, "Obs_nodes", &row.ints())?;
                self.params.boundary.observation_nodes = nodes;
            }
            "NPart" => p.boundary.particles = row.int(0),
            "NDr" => {
                let drains = count(cursor, "NDr", row.int(0))?;
                p.boundary.drains.drains = vec![Drain::default(); drains];
                p.boundary.drains.correction = row.real(1);
                self.counts.drain_elements = vec![0; drains];
            }
            "ND" => {
                let nodes = self.node_numbers(cursor, "ND", &row.ints())?;
                for (drain, node) in self.params.boundary.drains.drains.iter_mut().zip(nodes) {
                    drain.node = node;
                }
            }
            "NElD" => {
                for (i, elements) in row.ints().into_iter().enumerate() {
                    if let Some(slot) = self.counts.drain_elements.get_mut(i) {
                        *slot = count(cursor, "NElD", elements)?;
                    }
                }
            }
            "EfDim" => {
                p.boundary.drains.effective_diameter = row.real(0);
                p.boundary.drains.square = row.real(1);
            }
            "KElDr" => {
                let elements = row
                    .ints()
                    .into_iter()
                    .map(|e| count(cursor, "KElDr", e))
                    .collect::<Result<Vec<_>>>()?;
                if let Some(drain) = p.boundary.drains.drains.get_mut(index) {
                    drain.elements = elements;
                }
            }
            "KodCB" => self.solute_codes = row.ints(),
            "KodTB" => self.heat_codes = row.ints(),

            // Domain.dat
            "NS" => {
                let solutes = count(cursor, "NS", row.int(0))?;
                if solutes != self.counts.solutes {
                    return Err(inconsistent(
                        cursor,
                        format!(
                            "{} solutes in Domain.dat, {} declared before",
                            solutes, self.counts.solutes
                        ),
                    ));
                }
                let expected =
                    !p.solute.enabled || FeatureFlags::equilibrium(p.solute.transport);
                if (row.int(1) != 0) != expected {
                    warn!(
                        "Domain.dat equilibrium flag is {}, the transport settings give {}",
                        row.int(1),
                        expected as i64
                    );
                }
            }
            "nodes" => {
                let mut nodes = Vec::with_capacity(block.len());
                for (i, values) in block.iter().enumerate() {
                    let fields = Fields(values);
                    if fields.int(0) != i as i64 + 1 {
                        return Err(inconsistent(
                            cursor,
                            format!("node {} is numbered {}", i + 1, fields.int(0)),
                        ));
                    }
                    nodes.push(NodeState {
                        code: fields.int(1),
                        head: fields.real(2),
                        flux: fields.real(3),
                        material: count(cursor, "M", fields.int(4))?,
                        beta: fields.real(5),
                        axz: fields.real(6),
                        bxz: fields.real(7),
                        dxz: fields.real(8),
                        temperature: fields.real(9),
                        concentrations: fields.reals(10),
                        ..NodeState::default()
                    });
                }
                self.params.domain.nodes = nodes;
                self.apply_boundary(cursor)?;
            }
            "elements" => {
                p.domain.elements = block
                    .iter()
                    .map(|values| -> Result<ElementState> {
                        let fields = Fields(values);
                        Ok(ElementState {
                            angle: fields.real(1),
                            anisotropy_1: fields.real(2),
                            anisotropy_2: fields.real(3),
                            subregion: count(cursor, "LayNum", fields.int(4))?,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?
            }

            // Atmosph.in
            "MaxAL" => {
                self.counts.atmosphere_records = count(cursor, "MaxAL", row.int(0))?;
                p.atmosphere.cycles = row.int(1);
            }
            "hCritS" => p.atmosphere.h_crit_s = row.real(0),
            "records" => p.atmosphere.records = table(block),

            _ => {
                return Err(DeckError::UnhandledRecord {
                    section,
                    record: name,
                })
            }
        }
        Ok(())
    }

    /// 1-based node numbers, each within the mesh.
    fn node_numbers(
        &self,
        cursor: &LineCursor,
        field: &'static str,
        values: &[i64],
    ) -> Result<Vec<usize>> {
        values
            .iter()
            .map(|n| -> Result<usize> {
                let node = count(cursor, field, *n)?;
                if node == 0 || node > self.counts.nodes {
                    return Err(inconsistent(
                        cursor,
                        format!("{} {} outside 1..={}", field, node, self.counts.nodes),
                    ));
                }
                Ok(node)
            })
            .collect()
    }

    /// The mesh file must hold exactly the structured grid of its own
    /// coordinates.
    fn check_mesh(&mut self, cursor: &LineCursor) -> Result<()> {
        let shape = |flat: &[f64]| (flat.len() / 2, 2);
        let nodes = Array2::from_shape_vec(shape(&self.mesh_nodes), self.mesh_nodes.clone())
            .map_err(|e| inconsistent(cursor, e.to_string()))?;
        let elements = Array2::from_shape_vec(
            (self.mesh_elements.len() / 3, 3),
            self.mesh_elements.clone(),
        )
        .map_err(|e| inconsistent(cursor, e.to_string()))?;

        let (x, z) = grid_axes(&nodes);
        let grid = mesh::generate(&x, &z).map_err(|e| inconsistent(cursor, e.to_string()))?;
        if grid.nodes != nodes || grid.elements != elements {
            return Err(inconsistent(
                cursor,
                format!(
                    "mesh is not the structured {}x{} grid of its coordinates",
                    x.len(),
                    z.len()
                ),
            ));
        }

        self.params.domain.set_grid(x, z, NodeState::default())
    }

    /// Copies the boundary codes onto the nodes and checks the boundary list
    /// against the nonzero node codes.
    fn apply_boundary(&mut self, cursor: &LineCursor) -> Result<()> {
        let nodes = &mut self.params.domain.nodes;
        for (node, code) in self.boundary.iter().zip(&self.solute_codes) {
            if let Some(state) = nodes.get_mut(node - 1) {
                state.solute_code = *code;
            }
        }
        for (node, code) in self.boundary.iter().zip(&self.heat_codes) {
            if let Some(state) = nodes.get_mut(node - 1) {
                state.heat_code = *code;
            }
        }

        if self.params.domain.boundary_nodes() != self.boundary {
            return Err(inconsistent(
                cursor,
                "boundary node list does not match the nodes with a nonzero code",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use {
        super::*,
        crate::deck::{render_deck, write_deck},
        tempdir::TempDir,
    };

    fn write(params: &Parameters) -> TempDir {
        let dir = TempDir::new("hydrus-deck").unwrap();
        write_deck(dir.path(), params).unwrap();
        dir
    }

    fn replace_in(dir: &TempDir, file: DeckFile, from: &str, to: &str) {
        let path = dir.path().join(file.file_name());
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains(from));
        fs::write(&path, text.replacen(from, to, 1)).unwrap();
    }

    #[test]
    fn default_round_trip() {
        let params = Parameters::default();
        let dir = write(&params);
        assert_eq!(read_deck(dir.path()).unwrap(), params);
    }

    #[test]
    fn label_with_spaces() {
        let mut params = Parameters::default();
        params.hydraulic.materials[0].name = "Silty Clay Loam".to_owned();
        let dir = write(&params);
        let read = read_deck(dir.path()).unwrap();
        assert_eq!(read.hydraulic.materials[0].name, "Silty Clay Loam");
    }

    #[test]
    fn missing_file() {
        let params = Parameters::default();
        let dir = write(&params);
        fs::remove_file(dir.path().join("Boundary.in")).unwrap();
        assert!(matches!(read_deck(dir.path()), Err(DeckError::Io { .. })));
    }

    #[test]
    fn unknown_domain_type() {
        let dir = write(&Parameters::default());
        let files = render_deck(&Parameters::default()).unwrap();
        let kat = files[0].1.lines().nth(9).unwrap().to_owned();
        assert_eq!(kat.trim(), "2");
        replace_in(&dir, DeckFile::Selector, &format!("\n{}\n", kat), "\n  7\n");

        match read_deck(dir.path()) {
            Err(DeckError::Parse {
                file: DeckFile::Selector,
                line: 10,
                kind: ParseErrorKind::UnknownVariant { field: "Kat", value: 7 },
            }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn material_count_disagreement() {
        let dir = write(&Parameters::default());
        let path = dir.path().join("Dimensio.in");
        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines().map(str::to_owned).collect::<Vec<_>>();
        let mut tokens = lines[2].split_whitespace().map(str::to_owned).collect::<Vec<_>>();
        tokens[8] = "3".to_owned();
        lines[2] = tokens.join(" ");
        fs::write(&path, lines.join("\n")).unwrap();

        assert!(matches!(
            read_deck(dir.path()),
            Err(DeckError::Parse {
                file: DeckFile::Dimensio,
                line: 3,
                kind: ParseErrorKind::Inconsistent(_),
            })
        ));
    }

    fn edit_tokens<F: FnOnce(&mut Vec<String>)>(dir: &TempDir, file: DeckFile, line: usize, edit: F) {
        let path = dir.path().join(file.file_name());
        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines().map(str::to_owned).collect::<Vec<_>>();
        let mut tokens: Vec<String> = lines[line].split_whitespace().map(str::to_owned).collect();
        edit(&mut tokens);
        lines[line] = tokens.join(" ");
        fs::write(&path, lines.join("\n")).unwrap();
    }

    #[test]
    fn node_material_out_of_range() {
        let dir = write(&Parameters::default());
        let text = fs::read_to_string(dir.path().join("Domain.dat")).unwrap();
        let first_node = text
            .lines()
            .position(|line| {
                let tokens = line.split_whitespace().collect::<Vec<_>>();
                tokens.len() == 11 && tokens[0] == "1"
            })
            .unwrap();
        edit_tokens(&dir, DeckFile::Domain, first_node, |tokens| {
            assert_eq!(tokens[0], "1");
            tokens[4] = "9".to_owned();
        });

        match read_deck(dir.path()) {
            Err(DeckError::Parse {
                file: DeckFile::Domain,
                kind: ParseErrorKind::Inconsistent(message),
                ..
            }) => assert_eq!(message, "node 1 references material 9 of 1"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn no_solutes_declared() {
        let dir = write(&Parameters::default());
        edit_tokens(&dir, DeckFile::Dimensio, 2, |tokens| tokens[10] = "0".to_owned());

        assert!(matches!(
            read_deck(dir.path()),
            Err(DeckError::Parse {
                file: DeckFile::Dimensio,
                line: 3,
                kind: ParseErrorKind::Inconsistent(_),
            })
        ));
    }

    #[test]
    fn perturbed_mesh() {
        let dir = write(&Parameters::default());
        replace_in(&dir, DeckFile::Meshtria, "     2           100", "     2           150");
        assert!(matches!(
            read_deck(dir.path()),
            Err(DeckError::Parse {
                file: DeckFile::Meshtria,
                kind: ParseErrorKind::Inconsistent(_),
                ..
            })
        ));
    }

    #[test]
    fn equilibrium_mismatch_only_warns() {
        let mut params = Parameters::default();
        params.solute.enabled = true;
        let dir = write(&params);
        replace_in(&dir, DeckFile::Domain, "        1    1", "        1    0");
        assert_eq!(read_deck(dir.path()).unwrap(), params);
    }

    #[test]
    fn unmapped_record_is_an_error() {
        let cursor = LineCursor::new(DeckFile::Selector, "");
        let mut decoder = Decoder::default();
        match decoder.decode(&cursor, SectionId::BasicInfo, "Subheading", 0, &Vec::new()) {
            Err(DeckError::UnhandledRecord {
                section: SectionId::BasicInfo,
                record: "Subheading",
            }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn heading_keeps_leading_space() {
        let mut params = Parameters::default();
        params.general.heading = "  Ridge  and furrow".to_owned();
        let dir = write(&params);
        assert_eq!(read_deck(dir.path()).unwrap().general.heading, "  Ridge  and furrow");
    }
}

