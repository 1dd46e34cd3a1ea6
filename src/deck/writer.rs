use {
    super::{format::render_line, Block, Value},
    crate::{
        constants::VERSION_KEY,
        error::{DeckError, Result},
        mesh::Mesh,
        parameters::{NodeState, Parameters, ReservoirKind, TransportModel},
        schema::{self, Counts, DeckFile, FeatureFlags, Record, Section, SectionId},
    },
    log::{debug, info},
    std::{collections::HashMap, fs, iter, path::Path},
};

/// Writes the deck for `params` into `dir`, creating it if needed.
///
/// The whole deck is rendered before the first file is created, so a
/// configuration or schema error leaves the directory untouched.
pub fn write_deck<P: AsRef<Path>>(dir: P, params: &Parameters) -> Result<()> {
    let dir = dir.as_ref();
    info!("Writing deck to {}", dir.display());

    let files = render_deck(params)?;

    fs::create_dir_all(dir).map_err(|e| DeckError::io(dir, e))?;
    for (file, text) in &files {
        let path = dir.join(file.file_name());
        fs::write(&path, text).map_err(|e| DeckError::io(&path, e))?;
        debug!("Wrote {} ({} bytes)", path.display(), text.len());
    }

    info!("Wrote {} files", files.len());
    Ok(())
}

/// Renders the text of every file of the deck, in reading order.
pub fn render_deck(params: &Parameters) -> Result<Vec<(DeckFile, String)>> {
    params.validate()?;

    let mesh = params.domain.mesh()?;
    let flags = FeatureFlags::of(params);
    let counts = Counts::of(params);
    let encoder = Encoder::new(params, &mesh);

    let sections = schema::resolve(&flags, &counts);
    let mut encoded = Vec::new();
    for section in sections.iter().filter(|section| section.is_present()) {
        encoded.push((section, encoder.encode_section(section)?));
    }

    let mut files: Vec<(DeckFile, String)> = Vec::new();
    for (section, blocks) in encoded {
        let file = section.id.file();
        if files.last().map(|(f, _)| *f) != Some(file) {
            let mut text = String::new();
            if let Some(version) = file.version() {
                text.push_str(&format!("{}={}\n", VERSION_KEY, version));
            }
            files.push((file, text));
        }
        if let Some((_, text)) = files.last_mut() {
            render_section(text, section, &blocks);
        }
        debug!("Rendered section {}", section.id);
    }

    Ok(files)
}

fn render_section(text: &mut String, section: &Section, blocks: &[Block]) {
    let mut blocks = blocks.iter();
    for record in section.records() {
        let block = match record {
            Record::Marker(marker) => {
                text.push_str(marker);
                text.push('\n');
                continue;
            }
            _ => match blocks.next() {
                Some(block) => block,
                None => return,
            },
        };

        match record {
            Record::Text(_) => {
                for line in block {
                    if let Some(Value::Text(s)) = line.first() {
                        text.push_str(s);
                    }
                    text.push('\n');
                }
            }
            Record::Row { fields, .. } | Record::Table { fields, .. } => {
                for line in block {
                    text.push_str(&render_line(line, fields));
                    text.push('\n');
                }
            }
            Record::Wrapped {
                field, per_line, ..
            } => {
                let values = block.first().map(Vec::as_slice).unwrap_or(&[]);
                if values.is_empty() {
                    text.push('\n');
                }
                for chunk in values.chunks(*per_line) {
                    text.push_str(&render_line(chunk, iter::repeat(field)));
                    text.push('\n');
                }
            }
            Record::Marker(_) => {}
        }
    }
}

/// Checks a block against the shape its record declares.
fn check_block(section: SectionId, record: &Record, block: &Block) -> Result<()> {
    let name = record.name().unwrap_or("marker");
    if block.len() != record.rows() {
        return Err(DeckError::Schema {
            section,
            record: name,
            row: None,
            expected: record.rows(),
            found: block.len(),
        });
    }
    if let Some((i, line)) = block
        .iter()
        .enumerate()
        .find(|(_, line)| line.len() != record.width())
    {
        return Err(DeckError::Schema {
            section,
            record: name,
            row: Some(i),
            expected: record.width(),
            found: line.len(),
        });
    }
    Ok(())
}

fn floats<'a, I: IntoIterator<Item = &'a f64>>(values: I) -> Vec<Value> {
    values.into_iter().map(Value::from).collect()
}

fn rows(table: &[Vec<f64>]) -> Block {
    table.iter().map(floats).collect()
}

/// Produces the values of every data record from the parameters.
struct Encoder<'a> {
    params: &'a Parameters,
    mesh: &'a Mesh,
    /// 1-based numbers of the boundary nodes
    boundary: Vec<usize>,
}

impl<'a> Encoder<'a> {
    fn new(params: &'a Parameters, mesh: &'a Mesh) -> Self {
        Encoder {
            params,
            mesh,
            boundary: params.domain.boundary_nodes(),
        }
    }

    fn encode_section(&self, section: &Section) -> Result<Vec<Block>> {
        let mut occurrences = HashMap::new();
        let mut blocks = Vec::new();
        for record in section.records() {
            if let Some(name) = record.name() {
                let index = occurrences.entry(name).or_insert(0);
                let block = self
                    .encode(name, *index)
                    .ok_or(DeckError::UnhandledRecord {
                        section: section.id,
                        record: name,
                    })?;
                *index += 1;
                check_block(section.id, record, &block)?;
                blocks.push(block);
            }
        }
        Ok(blocks)
    }

    /// Values of the `index`th record called `name` within its section, or
    /// `None` for a name no arm maps.
    fn encode(&self, name: &str, index: usize) -> Option<Block> {
        let p = self.params;
        let solute = &p.solute;
        let uptake = &p.root_uptake;
        let growth = &p.root_growth;
        let boundary = &p.boundary;
        let domain = &p.domain;

        let line = |values: Vec<Value>| vec![values];
        let centers = || {
            if growth.horizontal {
                floats(&growth.centers)
            } else {
                Vec::new()
            }
        };

        let block = match name {
            // Selector.in
            "Heading" => line(vec![p.general.heading.as_str().into()]),
            "LUnit" => line(vec![p.general.length_unit.as_str().into()]),
            "TUnit" => line(vec![p.general.time_unit.as_str().into()]),
            "MUnit" => line(vec![p.general.mass_unit.as_str().into()]),
            "Kat" => line(vec![p.general.domain_type.id().into()]),
            "MaxIt" => line(vec![
                p.iteration.max_iterations.into(),
                p.iteration.water_content_tolerance.into(),
                p.iteration.pressure_head_tolerance.into(),
                p.iteration.initial_pressure_head.into(),
            ]),
            "lWat" => line(vec![
                p.general.water_flow.into(),
                solute.enabled.into(),
                uptake.enabled.into(),
                p.output.short.into(),
                p.output.interval.into(),
                p.output.screen.into(),
                p.atmosphere.enabled.into(),
                p.heat.enabled.into(),
                p.hydraulic.temperature_dependent.into(),
                FeatureFlags::equilibrium(solute.transport).into(),
                p.general.external_mesh.into(),
                p.general.inverse.into(),
            ]),
            "lUnsatCh" => line(vec![
                (solute.transport == TransportModel::UnsatChem).into(),
                (solute.transport == TransportModel::ColloidFacilitated).into(),
                (solute.transport == TransportModel::Hp2).into(),
                uptake.active_uptake.into(),
                growth.enabled.into(),
                false.into(),
                false.into(),
                false.into(),
            ]),
            "PrintStep" => line(vec![
                p.output.print_step.into(),
                p.output.print_interval.into(),
                p.output.press_enter.into(),
            ]),
            "NMat" => line(vec![
                p.material_count().into(),
                p.hydraulic.subregions.into(),
                p.hydraulic.h_tab_min.into(),
                p.hydraulic.h_tab_max.into(),
            ]),
            "Model" => line(vec![
                p.hydraulic.model().id().into(),
                p.hydraulic.hysteresis().id().into(),
            ]),
            "iKappa" => line(vec![p.hydraulic.initial_branch.id().into()]),
            "materials" => p
                .hydraulic
                .materials
                .iter()
                .map(|material| {
                    floats(&material.params)
                        .into_iter()
                        .chain(iter::once(material.name.as_str().into()))
                        .collect()
                })
                .collect(),
            "dt" => line(vec![
                p.time.dt.into(),
                p.time.dt_min.into(),
                p.time.dt_max.into(),
                p.iteration.dmul.into(),
                p.iteration.dmul2.into(),
                p.iteration.it_min.into(),
                p.iteration.it_max.into(),
                p.time.print_count().into(),
            ]),
            "tInit" => line(vec![p.time.t_init.into(), p.time.t_max.into()]),
            "TPrint" => line(floats(p.time.print_times.iter().skip(1))),

            "Epsi" => line(vec![
                solute.epsi.into(),
                solute.upstream.into(),
                solute.artificial_dispersion.into(),
                solute.temperature_dependent.into(),
                solute.abs_tolerance.into(),
                solute.rel_tolerance.into(),
                solute.max_iterations.into(),
                solute.peclet_courant.into(),
                p.solute_count().into(),
                solute.tortuosity.into(),
                solute.bacteria.into(),
                solute.filtration.into(),
            ]),
            "lWatDep" => {
                let mut values: Vec<Value> = vec![
                    solute.water_content_dependent.into(),
                    solute.initial_total_mass.into(),
                    solute.initial_equilibrium.into(),
                    solute.moldrup_tortuosity.into(),
                    solute.fumigant.into(),
                ];
                values.extend(iter::repeat(Value::Bool(false)).take(6));
                line(values)
            }
            "solute_soil" => rows(&solute.soil),
            "DifW" => solute
                .species
                .get(index)
                .map(|s| line(vec![s.diffusion_water.into(), s.diffusion_gas.into()]))
                .unwrap_or_default(),
            "reactions" => solute
                .species
                .get(index)
                .map(|s| rows(&s.reactions))
                .unwrap_or_default(),
            "temperature_diffusion" => solute
                .species
                .iter()
                .map(|s| floats(&s.temperature_diffusion))
                .collect(),
            "temperature_reactions" => solute
                .species
                .iter()
                .map(|s| floats(&s.temperature_reactions))
                .collect(),
            "cBnd" => solute.species.iter().map(|s| floats(&s.boundary)).collect(),
            "tPulse" => line(vec![solute.pulse_duration.into()]),
            "AddFumigant" => line(vec![solute.additional_fumigant.into()]),
            "AddFumTime" => line(vec![
                solute.injection.time.into(),
                solute.injection.mass.into(),
            ]),
            "AddFumMinX" => line(vec![
                solute.injection.min_x.into(),
                solute.injection.max_x.into(),
                solute.injection.min_z.into(),
                solute.injection.max_z.into(),
            ]),
            "nParamWC" => line(vec![solute.water_content_parameters.into()]),
            "water_content" => solute
                .species
                .get(index)
                .map(|s| rows(&s.water_content))
                .unwrap_or_default(),

            "heat" => rows(&p.heat.materials),
            "TTop" => line(floats(&p.heat.boundary)),
            "tAmpl" => line(vec![p.heat.amplitude.into(), p.heat.period.into()]),

            "iModel" => line(vec![uptake.model.id().into(), uptake.critical_stress.into()]),
            "P0" => {
                let f = &uptake.feddes;
                line(floats(&[f.p0, f.p2h, f.p2l, f.p3, f.r2h, f.r2l]))
            }
            "POptm" => line(floats(&uptake.feddes.poptm)),
            "P50" => {
                let s = &uptake.s_shape;
                line(floats(&[s.p50, s.p3, s.pw]))
            }
            "SoluteReduction" => line(vec![uptake.solute_reduction.into()]),
            "Additive" => line(vec![uptake.additive.into()]),
            "aOsm" => {
                let mut values = Vec::new();
                if uptake.solute_reduction && !uptake.additive {
                    values.extend(floats(&[uptake.c50, uptake.p3c]));
                }
                values.extend(floats(&uptake.osmotic));
                values.push((uptake.s_shaped_salinity as i64).into());
                line(values)
            }
            "OmegaS" => {
                let a = &uptake.active;
                let mut values = floats(&[a.omega_s, a.s_pot, a.km, a.c_min]);
                values.push(a.omega_w.into());
                line(values)
            }

            "iRootZoneShape" => line(vec![
                growth.zone_shape.id().into(),
                growth.depth_entry.id().into(),
            ]),
            "Horizontal" => line(vec![growth.horizontal.into(), growth.plants.into()]),
            "rZm" => {
                let v = &growth.vrugt;
                line(floats(&[v.zm, v.z0, v.a]))
            }
            "rRm" => {
                let v = &growth.vrugt;
                let mut values = floats(&[v.rm, v.r0, v.b]);
                values.extend(centers());
                line(values)
            }
            "RootDepth" => line(vec![growth.depth.into()]),
            "RootHalfWidth" => {
                let mut values = floats(&[growth.half_width, growth.half_width]);
                values.extend(centers());
                line(values)
            }
            "rCenter" => line(centers()),
            "nGrowth" => line(vec![growth.depth_table.len().into()]),
            "growth_table" => rows(&growth.depth_table),
            "iRFak" => {
                let g = &growth.growth;
                let mut values = vec![g.factor.into()];
                values.extend(floats(&[g.t_min, g.t_med, g.t_max, g.period]));
                line(values)
            }
            "ZRMin" => {
                let g = &growth.growth;
                line(floats(&[g.z_min, g.z_med, g.z_max]))
            }
            "rRMin" => line(floats(&[growth.growth.r_min, growth.growth.r_max])),

            // Dimensio.in
            "NumNPD" => line(vec![
                domain.node_count().into(),
                domain.element_count().into(),
                self.boundary.len().into(),
                p.limits.bandwidth.into(),
                p.limits.seepage_faces.into(),
                p.limits.seepage_nodes.into(),
                boundary.drains.drains.len().into(),
                p.limits.drain_elements.into(),
                p.material_count().into(),
                boundary.observation_nodes.len().into(),
                p.solute_count().into(),
            ]),

            // Meshtria.txt
            "mesh_header" => line(vec![
                1i64.into(),
                self.mesh.node_count().into(),
                1i64.into(),
                self.mesh.element_count().into(),
                1i64.into(),
            ]),
            "mesh_nodes" => self
                .mesh
                .nodes
                .outer_iter()
                .enumerate()
                .map(|(i, node)| vec![(i + 1).into(), node[0].into(), node[1].into()])
                .collect(),
            "mesh_elements" => self
                .mesh
                .elements
                .outer_iter()
                .enumerate()
                .map(|(e, element)| {
                    iter::once(e + 1)
                        .chain(element.iter().copied())
                        .map(Value::from)
                        .collect()
                })
                .collect(),

            // Boundary.in
            "NumBP" => line(vec![
                self.boundary.len().into(),
                boundary.observation_nodes.len().into(),
                boundary.seepage_faces.into(),
                boundary.free_drainage.into(),
                boundary.drains.enabled.into(),
                boundary.discharge_level.into(),
            ]),
            "Interp" => line(vec![
                boundary.interpolate.into(),
                boundary.head_to_flux.into(),
                boundary.head_to_zero_flux.into(),
                boundary.atmospheric_head.into(),
                boundary.seepage_head_switch.into(),
                boundary.atmospheric_level.into(),
                boundary.atmospheric_flux.into(),
                boundary.snow.into(),
            ]),
            "Gradient" => line(vec![
                boundary.gradient.into(),
                boundary.subsurface_drip.into(),
                boundary.surface_drip.into(),
                boundary.seepage_face.into(),
                boundary.triggered_irrigation.into(),
                boundary.reservoir.into(),
                false.into(),
                false.into(),
            ]),
            "Grad" => line(vec![boundary.gradient_value.into()]),
            "QDrip" => line(vec![boundary.drip.flux.into(), boundary.drip.exponent.into()]),
            "iDripCenter" => line(vec![
                boundary.surface.center.into(),
                boundary.surface.direction.into(),
            ]),
            "hSeep" => line(vec![boundary.seepage_head.into()]),
            "iIrrig" => {
                let irrigation = &boundary.irrigation;
                line(vec![
                    irrigation.node.into(),
                    irrigation.head.into(),
                    irrigation.kind.into(),
                    irrigation.rate.into(),
                    irrigation.duration.into(),
                    irrigation.lag.into(),
                ])
            }
            "iWell" => line(vec![boundary.well.kind.id().into()]),
            "zWBot" => {
                let well = &boundary.well;
                let mut values = floats(&[
                    well.bottom,
                    well.initial_level,
                    well.radius,
                    well.pumping,
                    well.concentration,
                ]);
                match well.kind {
                    ReservoirKind::Well => {}
                    ReservoirKind::Furrow => values.extend(floats(&[well.tan_alpha, well.max_level])),
                    ReservoirKind::Wetland => values.extend(floats(&[well.z_max, well.pp])),
                }
                line(values)
            }
            "nNode" => line(self.boundary.iter().copied().map(Value::from).collect()),
            "Width" => line(
                self.boundary
                    .iter()
                    .map(|n| domain.boundary_width(*n).into())
                    .collect(),
            ),
            "L_surf" => line(vec![boundary.transpiration_length.into()]),
            "Obs_nodes" => line(
                boundary
                    .observation_nodes
                    .iter()
                    .copied()
                    .map(Value::from)
                    .collect(),
            ),
            "NPart" => line(vec![boundary.particles.into()]),
            "NDr" => line(vec![
                boundary.drains.drains.len().into(),
                boundary.drains.correction.into(),
            ]),
            "ND" => line(
                boundary
                    .drains
                    .drains
                    .iter()
                    .map(|drain| drain.node.into())
                    .collect(),
            ),
            "NElD" => line(
                boundary
                    .drains
                    .drains
                    .iter()
                    .map(|drain| drain.elements.len().into())
                    .collect(),
            ),
            "EfDim" => line(floats(&[
                boundary.drains.effective_diameter,
                boundary.drains.square,
            ])),
            "KElDr" => boundary
                .drains
                .drains
                .get(index)
                .map(|drain| line(drain.elements.iter().copied().map(Value::from).collect()))
                .unwrap_or_default(),
            "KodCB" => line(self.boundary_codes(|node| node.solute_code)),
            "KodTB" => line(self.boundary_codes(|node| node.heat_code)),

            // Domain.dat
            "NS" => line(vec![
                p.solute_count().into(),
                ((!solute.enabled || FeatureFlags::equilibrium(solute.transport)) as i64).into(),
            ]),
            "nodes" => domain
                .nodes
                .iter()
                .enumerate()
                .map(|(i, node)| {
                    let mut values: Vec<Value> = vec![
                        (i + 1).into(),
                        node.code.into(),
                        node.head.into(),
                        node.flux.into(),
                        node.material.into(),
                        node.beta.into(),
                        node.axz.into(),
                        node.bxz.into(),
                        node.dxz.into(),
                        node.temperature.into(),
                    ];
                    values.extend(floats(&node.concentrations));
                    values
                })
                .collect(),
            "elements" => domain
                .elements
                .iter()
                .enumerate()
                .map(|(e, element)| {
                    vec![
                        (e + 1).into(),
                        element.angle.into(),
                        element.anisotropy_1.into(),
                        element.anisotropy_2.into(),
                        element.subregion.into(),
                    ]
                })
                .collect(),

            // Atmosph.in
            "MaxAL" => line(vec![
                p.atmosphere.records.len().into(),
                p.atmosphere.cycles.into(),
            ]),
            "hCritS" => line(vec![p.atmosphere.h_crit_s.into()]),
            "records" => rows(&p.atmosphere.records),

            _ => return None,
        };
        Some(block)
    }

    fn boundary_codes<F>(&self, code: F) -> Vec<Value>
    where
        F: Fn(&NodeState) -> i64,
    {
        self.boundary
            .iter()
            .filter_map(|n| self.params.domain.nodes.get(n - 1))
            .map(|node| code(node).into())
            .collect()
    }
}
