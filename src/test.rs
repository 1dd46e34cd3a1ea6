use {
    crate::{
        deck::{read_deck, render_deck, write_deck},
        error::{DeckError, ParseErrorKind},
        parameters::{
            Drain, FumigantInjection, HydraulicModel, Hysteresis, Material, Parameters,
            ReservoirKind, RootDepthEntry, RootZoneShape, TransportModel, UptakeModel,
        },
        schema::DeckFile,
        utils::{assert_approx_eq_decks, assert_approx_eq_slice},
    },
    lazy_static::lazy_static,
    std::fs,
    tempdir::TempDir,
};

/// Marks the top row atmospheric and the bottom row free drainage. Solute
/// and heat codes are only set for the modules that write them.
fn set_boundary_rows(params: &mut Parameters) {
    let nx = params.domain.x.len();
    let count = params.domain.nodes.len();
    let (solute, heat) = (params.solute.enabled, params.heat.enabled);
    for (i, node) in params.domain.nodes.iter_mut().enumerate() {
        let (code, solute_code, heat_code) = if i < nx {
            (-4, -1, 1)
        } else if i >= count - nx {
            (-6, 0, 0)
        } else {
            continue;
        };
        node.code = code;
        if solute {
            node.solute_code = solute_code;
        }
        if heat {
            node.heat_code = heat_code;
        }
    }
}

lazy_static! {
    static ref DEFAULT: Parameters = Parameters::default();

    /// Two materials and two solutes with every Selector block that does not
    /// need a single solute, plus every optional boundary block.
    static ref TRANSPORT: Parameters = {
        let mut params = Parameters::default();
        params.general.heading = "Furrow irrigation, two solutes".to_owned();

        params.set_material_count(2);
        params.hydraulic.materials[1] =
            Material::from_catalog("Sandy Loam", HydraulicModel::VanGenuchten).unwrap();
        params.hydraulic.subregions = 2;
        params.time.set_print_count(8);

        params.solute.enabled = true;
        params.solute.temperature_dependent = true;
        params.solute.water_content_dependent = true;
        params.solute.bacteria = true;
        params.solute.filtration = true;
        params.set_fumigant(true);
        params.set_additional_fumigant(true).unwrap();
        params.solute.injection = FumigantInjection {
            time: 2.0,
            mass: 150.0,
            min_x: 100.0,
            max_x: 300.0,
            min_z: 150.0,
            max_z: 200.0,
        };
        params.set_solute_count(2);
        params.solute.soil[1] = vec![1.4, 10.0, 1.0, 1.0, 0.0];
        params.solute.species[0].diffusion_water = 1.5;
        params.solute.species[1].diffusion_water = 0.25;
        params.solute.species[1].diffusion_gas = 4000.0;
        params.solute.species[1].reactions[1][0] = 0.8;
        params.solute.species[1].reactions[1][7] = 0.05;
        params.solute.species[0].boundary[0] = 10.0;
        params.solute.species[1].temperature_reactions[7] = 2.5e4;
        params.solute.species[1].water_content[0][3] = 0.25;

        params.heat.enabled = true;
        params.heat.boundary = vec![25.0, 20.0, 0.0, 0.0, 0.0, 0.0];

        params.root_uptake.enabled = true;
        params.root_uptake.model = UptakeModel::SShape;
        params.root_uptake.solute_reduction = true;
        params.root_uptake.additive = false;
        params.root_uptake.osmotic = vec![1.0, 0.5];
        params.root_uptake.s_shaped_salinity = true;

        params.boundary.gradient = true;
        params.boundary.gradient_value = 0.5;
        params.boundary.subsurface_drip = true;
        params.boundary.drip.flux = 12.5;
        params.boundary.surface_drip = true;
        params.boundary.surface.center = 6;
        params.boundary.seepage_face = true;
        params.boundary.seepage_head = -5.0;
        params.boundary.triggered_irrigation = true;
        params.boundary.irrigation.node = 61;
        params.boundary.irrigation.rate = 2.0;
        params.boundary.reservoir = true;
        params.boundary.well.kind = ReservoirKind::Furrow;
        params.boundary.well.tan_alpha = 0.5;
        params.boundary.well.max_level = 10.0;
        params.boundary.observation_nodes = vec![13, 61];
        params.boundary.drains.enabled = true;
        params.boundary.drains.drains = vec![Drain {
            node: 61,
            elements: vec![99, 100, 101, 102],
        }];
        params.boundary.transpiration_length = 1000.0;

        params.atmosphere.enabled = true;
        params.atmosphere.h_crit_s = 1.0e5;
        params.atmosphere.records = (0..3)
            .map(|i| {
                let mut record = vec![0.0; 18];
                record[0] = i as f64 + 1.0;
                record[1] = 0.5;
                record[4] = -1.0e5;
                record
            })
            .collect();

        set_boundary_rows(&mut params);
        params
    };

    /// Single solute with active uptake and Vrugt root growth over two plants.
    static ref ROOTS: Parameters = {
        let mut params = Parameters::default();
        params.solute.enabled = true;

        params.root_uptake.enabled = true;
        params.root_uptake.solute_reduction = true;
        params.root_uptake.active_uptake = true;
        params.root_uptake.active.km = 0.25;

        params.root_growth.enabled = true;
        params.root_growth.zone_shape = RootZoneShape::Vrugt;
        params.root_growth.depth_entry = RootDepthEntry::GrowthFunction;
        params.root_growth.horizontal = true;
        params.root_growth.plants = 2;
        params.root_growth.centers = vec![250.0, 750.0];
        params.root_growth.vrugt.zm = 100.0;
        params.root_growth.vrugt.z0 = 20.0;
        params.root_growth.vrugt.a = 1.0;
        params.root_growth.vrugt.rm = 100.0;
        params.root_growth.growth.factor = 1;

        set_boundary_rows(&mut params);
        params
    };
}

fn write(params: &Parameters) -> TempDir {
    let dir = TempDir::new("hydrus-deck").unwrap();
    write_deck(dir.path(), params).unwrap();
    dir
}

fn deck_text(params: &Parameters, file: DeckFile) -> String {
    render_deck(params)
        .unwrap()
        .into_iter()
        .find(|(f, _)| *f == file)
        .map(|(_, text)| text)
        .unwrap()
}

mod round_trip {
    use super::*;

    fn assert_round_trip(params: &Parameters) {
        let dir = write(params);
        let read = read_deck(dir.path()).unwrap();
        assert_eq!(&read, params);

        let again = write(&read);
        assert_approx_eq_decks(dir.path(), again.path());
    }

    #[test]
    fn default() {
        assert_round_trip(&DEFAULT);
    }

    #[test]
    fn transport() {
        assert_round_trip(&TRANSPORT);
    }

    #[test]
    fn roots() {
        assert_round_trip(&ROOTS);
    }

    #[test]
    fn brooks_corey_with_hysteresis() {
        let mut params = TRANSPORT.clone();
        params.hydraulic.set_model(HydraulicModel::BrooksCorey);
        params.hydraulic.set_hysteresis(Hysteresis::RetentionConductivity);
        assert_round_trip(&params);

        let selector = deck_text(&params, DeckFile::Selector);
        let model = selector
            .lines()
            .skip_while(|line| !line.contains("Model   Hysteresis"))
            .nth(1)
            .unwrap()
            .split_whitespace()
            .collect::<Vec<_>>();
        assert_eq!(model, vec!["2", "2"]);
    }

    #[test]
    fn root_depth_table() {
        let mut params = ROOTS.clone();
        params.root_growth.zone_shape = RootZoneShape::Constant;
        params.root_growth.depth_entry = RootDepthEntry::Table;
        params.root_growth.vrugt = DEFAULT.root_growth.vrugt.clone();
        params.root_growth.growth = DEFAULT.root_growth.growth.clone();
        params.root_growth.depth_table = vec![vec![0.0, 5.0, 10.0], vec![30.0, 40.0, 60.0]];
        assert_round_trip(&params);
    }

    #[test]
    fn constant_root_depth() {
        let mut params = ROOTS.clone();
        params.root_growth.zone_shape = RootZoneShape::Constant;
        params.root_growth.depth_entry = RootDepthEntry::Constant;
        params.root_growth.vrugt = DEFAULT.root_growth.vrugt.clone();
        params.root_growth.growth = DEFAULT.root_growth.growth.clone();
        params.root_growth.depth = 55.0;
        params.root_growth.half_width = 35.0;
        assert_round_trip(&params);
    }

    #[test]
    fn scaled_grid() {
        let mut params = Parameters::default();
        params
            .domain
            .set_grid(
                vec![0.0, 0.5, 1.25, 3.0],
                vec![-2.0, -1.0, 0.0],
                Default::default(),
            )
            .unwrap();
        set_boundary_rows(&mut params);

        let dir = write(&params);
        let read = read_deck(dir.path()).unwrap();
        assert_approx_eq_slice(&read.domain.x, &params.domain.x);
        assert_approx_eq_slice(&read.domain.z, &params.domain.z);
        assert_eq!(read.domain.boundary_nodes(), vec![1, 2, 3, 4, 9, 10, 11, 12]);
    }
}

mod scenarios {
    use super::*;

    #[test]
    fn loam_material_row() {
        let selector = deck_text(&DEFAULT, DeckFile::Selector);
        let row = " 0.078   0.43  0.036   1.56  24.96    0.5 Loam";
        assert_eq!(selector.lines().filter(|line| *line == row).count(), 1);

        let dir = write(&DEFAULT);
        let read = read_deck(dir.path()).unwrap();
        assert_eq!(read.hydraulic.materials[0].name, "Loam");
        assert_approx_eq_slice(
            &read.hydraulic.materials[0].params,
            &[0.078, 0.43, 0.036, 1.56, 24.96, 0.5],
        );
    }

    #[test]
    fn dimensions() {
        insta::assert_snapshot!(deck_text(&DEFAULT, DeckFile::Dimensio).trim_end(), @r###"
Pcp_File_Version=3
  NumNPD  NumElD  NumBPD  MBandD  NSeepD  NumSPD    NDrD  NElDrD   NMatD   NObsD     NSD   NAnis
     121     200       0      30       1       1       0      20       1       0       1
"###);
    }

    #[test]
    fn counts_agree_across_files() {
        let dimensio = deck_text(&TRANSPORT, DeckFile::Dimensio);
        let declared = dimensio.lines().nth(2).unwrap().split_whitespace().collect::<Vec<_>>();

        let meshtria = deck_text(&TRANSPORT, DeckFile::Meshtria);
        let header = meshtria.lines().next().unwrap().split_whitespace().collect::<Vec<_>>();
        assert_eq!(header[1], declared[0]);
        assert_eq!(header[3], declared[1]);

        assert_eq!(declared[2], "22");
        let boundary = deck_text(&TRANSPORT, DeckFile::Boundary);
        let numbp = boundary.lines().nth(3).unwrap().split_whitespace().next();
        assert_eq!(numbp, Some("22"));
    }

    #[test]
    fn solute_blocks_absent_when_disabled() {
        let selector = deck_text(&DEFAULT, DeckFile::Selector);
        assert!(!selector.contains("BLOCK D: SOLUTE"));
        let boundary = deck_text(&DEFAULT, DeckFile::Boundary);
        assert!(!boundary.contains("BLOCK J-D"));

        assert!(deck_text(&TRANSPORT, DeckFile::Selector).contains("BLOCK D: SOLUTE"));
    }

    #[test]
    fn root_growth_banner() {
        let selector = deck_text(&ROOTS, DeckFile::Selector);
        let banner = "*** BLOCK D: ROOT GROWTH INFORMATION ***********************************";
        assert_eq!(selector.lines().filter(|line| *line == banner).count(), 1);
        assert!(!deck_text(&DEFAULT, DeckFile::Selector).contains("ROOT GROWTH"));
    }

    #[test]
    fn packed_mesh_columns() {
        let meshtria = deck_text(&DEFAULT, DeckFile::Meshtria);
        let mut lines = meshtria.lines();
        assert_eq!(
            lines.next(),
            Some("         1       121         1       200         1")
        );
        assert_eq!(lines.next(), Some("     1             0           200"));
    }

    #[test]
    fn atmosphere_file_only_when_enabled() {
        let dir = write(&DEFAULT);
        assert!(!dir.path().join("Atmosph.in").exists());

        let dir = write(&TRANSPORT);
        assert!(dir.path().join("Atmosph.in").exists());
    }

    #[test]
    fn wrong_material_width_writes_nothing() {
        let dir = TempDir::new("hydrus-deck").unwrap();
        let mut params = DEFAULT.clone();
        params.hydraulic.materials[0].params.push(0.5);

        match write_deck(dir.path(), &params) {
            Err(DeckError::Schema {
                expected: 7,
                found: 8,
                ..
            }) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn truncated_selector() {
        let dir = write(&DEFAULT);
        let path = dir.path().join("Selector.in");
        let text = fs::read_to_string(&path).unwrap();
        let truncated = text.lines().take(11).collect::<Vec<_>>().join("\n");
        fs::write(&path, truncated).unwrap();

        let err = read_deck(dir.path()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Selector.in:12: unexpected end of file, expected MaxIt"
        );
    }

    #[test]
    fn short_row() {
        let dir = write(&DEFAULT);
        let path = dir.path().join("Selector.in");
        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines().map(str::to_owned).collect::<Vec<_>>();
        lines[11] = "  10   0.001 1".to_owned();
        fs::write(&path, lines.join("\n")).unwrap();

        match read_deck(dir.path()) {
            Err(err @ DeckError::Parse { .. }) => assert_eq!(
                err.to_string(),
                "Selector.in:12: MaxIt has 3 tokens, expected 4"
            ),
            other => panic!("unexpected {:?}", other),
        }
    }
}

mod derived {
    use super::*;

    #[test]
    fn hysteresis_forces_hysteretic_table() {
        let mut params = DEFAULT.clone();
        params.hydraulic.set_hysteresis(Hysteresis::Retention);
        assert_eq!(params.hydraulic.materials[0].params.len(), 10);

        let dir = write(&params);
        let read = read_deck(dir.path()).unwrap();
        assert_eq!(read.hydraulic.model(), HydraulicModel::VanGenuchten);
        assert_eq!(read.hydraulic.hysteresis(), Hysteresis::Retention);
        assert_eq!(read.hydraulic.effective_model(), HydraulicModel::Hysteretic);
        assert_eq!(read.hydraulic.material_columns(), 11);
        assert_eq!(read, params);
    }

    #[test]
    fn equilibrium_follows_transport() {
        let mut params = DEFAULT.clone();
        params.solute.enabled = true;
        params.set_transport(TransportModel::UnsatChem);

        let selector = deck_text(&params, DeckFile::Selector);
        let flags = selector
            .lines()
            .skip_while(|line| !line.starts_with("lWat"))
            .nth(1)
            .unwrap()
            .split_whitespace()
            .collect::<Vec<_>>();
        assert_eq!(flags[9], "f");

        let domain = deck_text(&params, DeckFile::Domain);
        let ns = domain.lines().nth(3).unwrap().split_whitespace().collect::<Vec<_>>();
        assert_eq!(ns, vec!["1", "0"]);

        let dir = write(&params);
        let read = read_deck(dir.path()).unwrap();
        assert_eq!(read.solute.transport, TransportModel::UnsatChem);
    }

    #[test]
    fn unknown_model_is_reported() {
        let dir = write(&DEFAULT);
        let path = dir.path().join("Selector.in");
        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines().map(str::to_owned).collect::<Vec<_>>();
        let at = lines.iter().position(|line| line.contains("Model   Hysteresis")).unwrap();
        lines[at + 1] = "     12          0".to_owned();
        fs::write(&path, lines.join("\n")).unwrap();

        match read_deck(dir.path()) {
            Err(DeckError::Parse {
                file: DeckFile::Selector,
                kind: ParseErrorKind::UnknownVariant { field: "Model", value: 12 },
                ..
            }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
