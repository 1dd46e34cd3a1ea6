//! Layout of the deck as a function of the configuration flags.
//!
//! Every section of every file is listed in reading order. A section is
//! either absent or present with a declarative list of records, so the
//! writer and the reader walk the same layout.

pub mod flags;
pub mod markers;

pub use flags::{Counts, FeatureFlags};

use {
    crate::parameters::{
        HydraulicModel, ReservoirKind, RootDepthEntry, RootZoneShape, UptakeModel,
        REACTION_PARAMETERS,
    },
    markers::*,
    std::fmt,
};

/// One file of the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeckFile {
    Selector,
    Dimensio,
    Meshtria,
    Boundary,
    Domain,
    Atmosph,
}

impl DeckFile {
    /// Reading order; flags read from a file only gate files after it.
    pub const ALL: [DeckFile; 6] = [
        DeckFile::Selector,
        DeckFile::Dimensio,
        DeckFile::Meshtria,
        DeckFile::Boundary,
        DeckFile::Domain,
        DeckFile::Atmosph,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            DeckFile::Selector => "Selector.in",
            DeckFile::Dimensio => "Dimensio.in",
            DeckFile::Meshtria => "Meshtria.txt",
            DeckFile::Boundary => "Boundary.in",
            DeckFile::Domain => "Domain.dat",
            DeckFile::Atmosph => "Atmosph.in",
        }
    }

    /// Value of the `Pcp_File_Version` line, `None` for the mesh file which
    /// has no version line.
    pub fn version(self) -> Option<u32> {
        match self {
            DeckFile::Selector => Some(4),
            DeckFile::Dimensio => Some(3),
            DeckFile::Meshtria => None,
            DeckFile::Boundary => Some(5),
            DeckFile::Domain => Some(2),
            DeckFile::Atmosph => Some(3),
        }
    }
}

impl fmt::Display for DeckFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    BasicInfo,
    MaterialInfo,
    Hysteresis,
    Materials,
    TimeInfo,
    PrintTimes,
    SoluteInfo,
    SoluteMaterials,
    SoluteReactions,
    SoluteTemperature,
    SoluteBoundary,
    Fumigant,
    FumigantInjection,
    WaterContentParams,
    WaterContentTables,
    HeatTransport,
    RootUptake,
    FeddesUptake,
    SShapeUptake,
    SoluteStress,
    SoluteStressModel,
    OsmoticCoefficients,
    ActiveUptake,
    RootGrowth,
    RootDistribution,
    RootDepthCount,
    RootDepthTable,
    RootGrowthFunction,
    SelectorEnd,

    Dimensions,

    MeshHeader,
    MeshNodes,
    MeshElements,
    MeshEnd,

    BoundaryInfo,
    GradientBc,
    SubsurfaceDrip,
    SurfaceDrip,
    SeepageFace,
    TriggeredIrrigation,
    ReservoirType,
    ReservoirGeometry,
    BoundaryNodes,
    ObservationNodes,
    FlowingParticles,
    DrainInfo,
    DrainNodes,
    DrainElements,
    SoluteBoundaryCodes,
    HeatBoundaryCodes,
    BoundaryEnd,

    DomainNodes,
    DomainElements,
    DomainEnd,

    AtmosphereInfo,
    AtmosphereRecords,
    AtmosphereEnd,
}

impl SectionId {
    /// Every section in reading order.
    pub const ALL: [SectionId; 57] = [
        SectionId::BasicInfo,
        SectionId::MaterialInfo,
        SectionId::Hysteresis,
        SectionId::Materials,
        SectionId::TimeInfo,
        SectionId::PrintTimes,
        SectionId::SoluteInfo,
        SectionId::SoluteMaterials,
        SectionId::SoluteReactions,
        SectionId::SoluteTemperature,
        SectionId::SoluteBoundary,
        SectionId::Fumigant,
        SectionId::FumigantInjection,
        SectionId::WaterContentParams,
        SectionId::WaterContentTables,
        SectionId::HeatTransport,
        SectionId::RootUptake,
        SectionId::FeddesUptake,
        SectionId::SShapeUptake,
        SectionId::SoluteStress,
        SectionId::SoluteStressModel,
        SectionId::OsmoticCoefficients,
        SectionId::ActiveUptake,
        SectionId::RootGrowth,
        SectionId::RootDistribution,
        SectionId::RootDepthCount,
        SectionId::RootDepthTable,
        SectionId::RootGrowthFunction,
        SectionId::SelectorEnd,
        SectionId::Dimensions,
        SectionId::MeshHeader,
        SectionId::MeshNodes,
        SectionId::MeshElements,
        SectionId::MeshEnd,
        SectionId::BoundaryInfo,
        SectionId::GradientBc,
        SectionId::SubsurfaceDrip,
        SectionId::SurfaceDrip,
        SectionId::SeepageFace,
        SectionId::TriggeredIrrigation,
        SectionId::ReservoirType,
        SectionId::ReservoirGeometry,
        SectionId::BoundaryNodes,
        SectionId::ObservationNodes,
        SectionId::FlowingParticles,
        SectionId::DrainInfo,
        SectionId::DrainNodes,
        SectionId::DrainElements,
        SectionId::SoluteBoundaryCodes,
        SectionId::HeatBoundaryCodes,
        SectionId::BoundaryEnd,
        SectionId::DomainNodes,
        SectionId::DomainElements,
        SectionId::DomainEnd,
        SectionId::AtmosphereInfo,
        SectionId::AtmosphereRecords,
        SectionId::AtmosphereEnd,
    ];

    pub fn file(self) -> DeckFile {
        use SectionId::*;
        match self {
            BasicInfo | MaterialInfo | Hysteresis | Materials | TimeInfo | PrintTimes
            | SoluteInfo | SoluteMaterials | SoluteReactions | SoluteTemperature
            | SoluteBoundary | Fumigant | FumigantInjection | WaterContentParams
            | WaterContentTables | HeatTransport | RootUptake | FeddesUptake | SShapeUptake
            | SoluteStress | SoluteStressModel | OsmoticCoefficients | ActiveUptake
            | RootGrowth | RootDistribution | RootDepthCount | RootDepthTable
            | RootGrowthFunction | SelectorEnd => DeckFile::Selector,
            Dimensions => DeckFile::Dimensio,
            MeshHeader | MeshNodes | MeshElements | MeshEnd => DeckFile::Meshtria,
            BoundaryInfo | GradientBc | SubsurfaceDrip | SurfaceDrip | SeepageFace
            | TriggeredIrrigation | ReservoirType | ReservoirGeometry | BoundaryNodes
            | ObservationNodes | FlowingParticles | DrainInfo | DrainNodes | DrainElements
            | SoluteBoundaryCodes | HeatBoundaryCodes | BoundaryEnd => DeckFile::Boundary,
            DomainNodes | DomainElements | DomainEnd => DeckFile::Domain,
            AtmosphereInfo | AtmosphereRecords | AtmosphereEnd => DeckFile::Atmosph,
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Int,
    /// Shortest decimal form, exponent notation only for extreme magnitudes
    Float,
    /// Always exponent notation
    Exp,
    /// `t` or `f`
    Bool,
    /// Free text running to the end of the line
    Label,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Minimum column width, values are right-justified
    pub width: usize,
}

/// One line, or run of lines, of a section.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// Literal line matched verbatim
    Marker(String),
    /// Whole line of free text
    Text(&'static str),
    Row {
        name: &'static str,
        fields: Vec<Field>,
    },
    Table {
        name: &'static str,
        rows: usize,
        fields: Vec<Field>,
    },
    /// List of `count` values broken every `per_line` values
    Wrapped {
        name: &'static str,
        field: Field,
        count: usize,
        per_line: usize,
    },
}

impl Record {
    /// Name of a data record, `None` for markers.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Record::Marker(_) => None,
            Record::Text(name)
            | Record::Row { name, .. }
            | Record::Table { name, .. }
            | Record::Wrapped { name, .. } => Some(*name),
        }
    }

    /// Expected number of value rows.
    pub fn rows(&self) -> usize {
        match self {
            Record::Marker(_) => 0,
            Record::Table { rows, .. } => *rows,
            _ => 1,
        }
    }

    /// Expected number of values in each row.
    pub fn width(&self) -> usize {
        match self {
            Record::Marker(_) => 0,
            Record::Text(_) => 1,
            Record::Row { fields, .. } | Record::Table { fields, .. } => fields.len(),
            Record::Wrapped { count, .. } => *count,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Presence {
    Present(Vec<Record>),
    Absent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: SectionId,
    pub presence: Presence,
}

impl Section {
    pub fn is_present(&self) -> bool {
        matches!(self.presence, Presence::Present(_))
    }

    pub fn records(&self) -> &[Record] {
        match &self.presence {
            Presence::Present(records) => records,
            Presence::Absent => &[],
        }
    }
}

/// Every section of the deck in reading order.
pub fn resolve(flags: &FeatureFlags, counts: &Counts) -> Vec<Section> {
    SectionId::ALL
        .iter()
        .map(|id| resolve_section(*id, flags, counts))
        .collect()
}

/// Presence and layout of a single section.
pub fn resolve_section(id: SectionId, flags: &FeatureFlags, counts: &Counts) -> Section {
    let records = layout(id, flags, counts).filter(|records| !records.is_empty());
    Section {
        id,
        presence: match records {
            Some(records) => Presence::Present(records),
            None => Presence::Absent,
        },
    }
}

fn int(name: &'static str, width: usize) -> Field {
    Field {
        name,
        kind: FieldKind::Int,
        width,
    }
}

fn float(name: &'static str, width: usize) -> Field {
    Field {
        name,
        kind: FieldKind::Float,
        width,
    }
}

fn exp(name: &'static str, width: usize) -> Field {
    Field {
        name,
        kind: FieldKind::Exp,
        width,
    }
}

fn flag(name: &'static str, width: usize) -> Field {
    Field {
        name,
        kind: FieldKind::Bool,
        width,
    }
}

fn label(name: &'static str) -> Field {
    Field {
        name,
        kind: FieldKind::Label,
        width: 0,
    }
}

fn marker<S: Into<String>>(text: S) -> Record {
    Record::Marker(text.into())
}

fn row(name: &'static str, fields: Vec<Field>) -> Record {
    Record::Row { name, fields }
}

fn table(name: &'static str, rows: usize, fields: Vec<Field>) -> Record {
    Record::Table { name, rows, fields }
}

fn wrapped(name: &'static str, field: Field, count: usize, per_line: usize) -> Record {
    Record::Wrapped {
        name,
        field,
        count,
        per_line,
    }
}

fn floats(names: &[&'static str], width: usize) -> Vec<Field> {
    names.iter().map(|name| float(name, width)).collect()
}

fn flags_row(names: &[&'static str], first: usize, rest: usize) -> Vec<Field> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| flag(name, if i == 0 { first } else { rest }))
        .collect()
}

fn repeat(field: Field, count: usize) -> Vec<Field> {
    vec![field; count]
}

fn material_header(model: HydraulicModel) -> String {
    let extra = match model {
        HydraulicModel::ModifiedVanGenuchten => "    Qm    Qa    Qk    Kk",
        HydraulicModel::DurnerDualPorosity => "    w2    Alfa2    n2",
        HydraulicModel::DualPorosityContent => "    QrIm    QsIm    Omega",
        HydraulicModel::DualPorosityHead => "    QrIm    QsIm    AlfaIm    nIm    Omega",
        HydraulicModel::Hysteretic => "    thm    thsW    AlfaW    KsW",
        _ => "",
    };
    format!("{}{}", MATERIALS, extra)
}

fn reaction_header(flags: &FeatureFlags) -> &'static str {
    match (flags.bacteria, flags.filtration) {
        (true, true) => REACTIONS_FILTRATION,
        (true, false) => REACTIONS_ATTACHMENT,
        _ => REACTIONS,
    }
}

fn reaction_fields() -> Vec<Field> {
    repeat(float("reaction", 11), REACTION_PARAMETERS)
}

fn centers(flags: &FeatureFlags, counts: &Counts) -> Vec<Field> {
    let plants = if flags.horizontal { counts.plants } else { 0 };
    repeat(float("rCenter", 9), plants)
}

fn layout(id: SectionId, flags: &FeatureFlags, counts: &Counts) -> Option<Vec<Record>> {
    use SectionId::*;

    let solute = flags.solute;
    let uptake = flags.root_uptake;
    let growth = flags.root_growth;

    match id {
        BasicInfo => Some(vec![
            marker(BLOCK_A),
            marker(HEADING),
            Record::Text("Heading"),
            marker(UNITS),
            Record::Text("LUnit"),
            Record::Text("TUnit"),
            Record::Text("MUnit"),
            marker(KAT),
            row("Kat", vec![int("Kat", 3)]),
            marker(ITERATION),
            row(
                "MaxIt",
                vec![
                    int("MaxIt", 4),
                    float("TolTh", 8),
                    float("TolH", 6),
                    flag("InitH/W", 5),
                ],
            ),
            marker(MAIN_FLAGS),
            row(
                "lWat",
                flags_row(
                    &[
                        "lWat", "lChem", "lSink", "Short", "Inter", "lScrn", "AtmIn", "lTemp",
                        "lWTDep", "lEquil", "lExtGen", "lInv",
                    ],
                    2,
                    5,
                ),
            ),
            marker(MODULE_FLAGS),
            row(
                "lUnsatCh",
                flags_row(
                    &[
                        "lUnsatCh", "lCFSTr", "lHP2", "lActRSU", "lRootGr", "lDummy", "lDummy",
                        "lDummy",
                    ],
                    2,
                    7,
                ),
            ),
            marker(PRINT),
            row(
                "PrintStep",
                vec![
                    int("PrintStep", 10),
                    float("PrintInterval", 14),
                    flag("lEnter", 7),
                ],
            ),
        ]),
        MaterialInfo => Some(vec![
            marker(BLOCK_B),
            marker(MATERIAL_INFO),
            row(
                "NMat",
                vec![
                    int("NMat", 3),
                    int("NLay", 7),
                    float("hTab1", 9),
                    float("hTabN", 7),
                ],
            ),
            marker(MODEL),
            row("Model", vec![int("Model", 7), int("Hysteresis", 10)]),
        ]),
        Hysteresis => flags
            .hysteresis
            .then(|| vec![marker(IKAPPA), row("iKappa", vec![int("iKappa", 7)])]),
        Materials => {
            let mut fields = floats(flags.model.parameter_names(), 6);
            fields.push(label("Name"));
            Some(vec![
                marker(material_header(flags.model)),
                table("materials", counts.materials, fields),
            ])
        }
        TimeInfo => Some(vec![
            marker(BLOCK_C),
            marker(TIME_STEP),
            row(
                "dt",
                vec![
                    float("dt", 11),
                    float("dtMin", 11),
                    float("dtMax", 11),
                    float("DMul", 7),
                    float("DMul2", 7),
                    int("ItMin", 5),
                    int("ItMax", 5),
                    int("MPL", 5),
                ],
            ),
            marker(TIME_RANGE),
            row("tInit", floats(&["tInit", "tMax"], 11)),
        ]),
        PrintTimes => Some(vec![
            marker(PRINT_TIMES),
            wrapped("TPrint", float("TPrint", 11), counts.print_times, 6),
        ]),

        SoluteInfo => solute.then(|| {
            vec![
                marker(BLOCK_D),
                marker(SOLUTE_INFO),
                row(
                    "Epsi",
                    vec![
                        float("Epsi", 5),
                        flag("lUpW", 5),
                        flag("lArtD", 5),
                        flag("lTDep", 5),
                        float("cTolA", 9),
                        float("cTolR", 9),
                        int("MaxItC", 5),
                        float("PeCr", 8),
                        int("NS", 8),
                        flag("Tortuosity", 9),
                        flag("Bacter", 9),
                        flag("Filtration", 9),
                    ],
                ),
                marker(SOLUTE_FLAGS),
                row(
                    "lWatDep",
                    flags_row(
                        &[
                            "lWatDep",
                            "lInitM",
                            "lInitEq",
                            "lTortM",
                            "lFumigant",
                            "lDummy",
                            "lDummy",
                            "lDummy",
                            "lDummy",
                            "lDummy",
                            "lDummy",
                        ],
                        10,
                        9,
                    ),
                ),
            ]
        }),
        SoluteMaterials => solute.then(|| {
            vec![
                marker(SOLUTE_SOIL),
                table(
                    "solute_soil",
                    counts.materials,
                    floats(&["Bulk.d.", "DisperL.", "DisperT", "Frac", "ThImob"], 11),
                ),
            ]
        }),
        SoluteReactions => solute.then(|| {
            (0..counts.solutes)
                .flat_map(|_| {
                    vec![
                        marker(DIFFUSION),
                        row("DifW", floats(&["DifW", "DifG"], 11)),
                        marker(reaction_header(flags)),
                        table("reactions", counts.materials, reaction_fields()),
                    ]
                })
                .collect()
        }),
        SoluteTemperature => (solute && flags.temperature_dependent).then(|| {
            vec![
                marker(TEMPERATURE_DEPENDENCE),
                marker(DIFFUSION),
                table(
                    "temperature_diffusion",
                    counts.solutes,
                    floats(&["DifW", "DifG"], 11),
                ),
                marker(REACTIONS),
                table("temperature_reactions", counts.solutes, reaction_fields()),
            ]
        }),
        SoluteBoundary => solute.then(|| {
            vec![
                marker(SOLUTE_BOUNDARY),
                table("cBnd", counts.solutes, repeat(float("cBnd", 11), 9)),
                marker(PULSE),
                row("tPulse", vec![float("tPulse", 11)]),
            ]
        }),
        Fumigant => (solute && flags.fumigant).then(|| {
            vec![
                marker(ADD_FUMIGANT),
                row("AddFumigant", vec![flag("AddFumigant", 10)]),
            ]
        }),
        FumigantInjection => (solute && flags.additional_fumigant).then(|| {
            vec![
                marker(FUMIGANT_DOSE),
                row("AddFumTime", floats(&["AddFumTime", "AddFumMass"], 13)),
                marker(FUMIGANT_REGION),
                row(
                    "AddFumMinX",
                    floats(&["AddFumMinX", "AddFumMaxX", "AddFumMinZ", "AddFumMaxZ"], 13),
                ),
            ]
        }),
        WaterContentParams => (solute && flags.water_content_dependent).then(|| {
            vec![
                marker(WATER_CONTENT_DEPENDENCE),
                marker(PARAMETER_COUNT),
                row("nParamWC", vec![int("nParamWC", 11)]),
            ]
        }),
        WaterContentTables => (solute && flags.water_content_dependent).then(|| {
            (0..counts.solutes)
                .flat_map(|_| {
                    vec![
                        marker(WATER_CONTENT),
                        table(
                            "water_content",
                            2,
                            repeat(float("WTDep", 11), counts.water_content_parameters),
                        ),
                    ]
                })
                .collect()
        }),

        HeatTransport => flags.heat.then(|| {
            let mut fields = floats(&["Qn", "Qo", "Disper.", "B1"], 7);
            fields.extend(
                ["B2", "B3", "Cn", "Co", "Cw", "Cs"]
                    .iter()
                    .map(|name| exp(name, 12)),
            );
            vec![
                marker(BLOCK_E),
                marker(HEAT_PARAMETERS),
                table("heat", counts.materials, fields),
                marker(HEAT_BOUNDARY),
                row("TTop", repeat(float("TBnd", 11), 6)),
                marker(HEAT_AMPLITUDE),
                row("tAmpl", floats(&["tAmpl", "tPeriod"], 11)),
            ]
        }),

        RootUptake => uptake.then(|| {
            vec![
                marker(BLOCK_F),
                marker(UPTAKE_MODEL),
                row("iModel", vec![int("iModel", 9), float("OmegaC", 30)]),
            ]
        }),
        FeddesUptake => (uptake && flags.uptake_model == UptakeModel::Feddes).then(|| {
            let mut fields = floats(&["P0", "P2H", "P2L", "P3"], 9);
            fields.extend(floats(&["r2H", "r2L"], 11));
            vec![
                marker(FEDDES),
                row("P0", fields),
                marker(POPTM),
                row("POptm", repeat(float("POptm", 8), counts.materials)),
            ]
        }),
        SShapeUptake => (uptake && flags.uptake_model == UptakeModel::SShape).then(|| {
            vec![
                marker(S_SHAPE),
                row("P50", floats(&["P50", "P3", "PW"], 9)),
            ]
        }),
        SoluteStress => (uptake && solute).then(|| {
            vec![
                marker(SOLUTE_REDUCTION),
                row("SoluteReduction", vec![flag("SoluteReduction", 9)]),
            ]
        }),
        SoluteStressModel => (uptake && solute && flags.solute_reduction).then(|| {
            vec![
                marker(ADDITIVE),
                row("Additive", vec![flag("Additive", 9)]),
            ]
        }),
        OsmoticCoefficients => (uptake && solute).then(|| {
            let mut fields = Vec::new();
            if flags.multiplicative {
                fields.extend(floats(&["c50", "P3c"], 9));
            }
            fields.extend(repeat(float("aOsm", 9), counts.solutes));
            fields.push(int("lMsSink", 1));
            vec![
                marker(if flags.multiplicative {
                    OSMOTIC_MULTIPLICATIVE
                } else {
                    OSMOTIC_ADDITIVE
                }),
                row("aOsm", fields),
            ]
        }),
        ActiveUptake => (uptake && flags.active_uptake).then(|| {
            let mut fields = floats(&["OmegaS", "SPot", "KM", "cMin"], 9);
            fields.push(flag("OmegaW", 9));
            vec![marker(ACTIVE_UPTAKE), row("OmegaS", fields)]
        }),

        RootGrowth => growth.then(|| {
            vec![
                marker(BLOCK_D_ROOT_GROWTH),
                marker(ROOT_SHAPE),
                row(
                    "iRootZoneShape",
                    vec![int("iRootZoneShape", 9), int("iRootDepthEntry", 8)],
                ),
                marker(PLANTS),
                row("Horizontal", vec![flag("Horizontal", 9), int("NPlants", 8)]),
            ]
        }),
        RootDistribution => growth.then(|| root_distribution(flags, counts)),
        RootDepthCount => (growth && flags.depth_entry == RootDepthEntry::Table)
            .then(|| vec![marker(GROWTH_COUNT), row("nGrowth", vec![int("nGrowth", 9)])]),
        RootDepthTable => (growth && flags.depth_entry == RootDepthEntry::Table).then(|| {
            vec![
                marker(GROWTH_TABLE),
                table(
                    "growth_table",
                    counts.growth_rows,
                    floats(&["Time", "RootDepth", "RootWidth"], 9),
                ),
            ]
        }),
        RootGrowthFunction => {
            (growth && flags.depth_entry == RootDepthEntry::GrowthFunction).then(|| {
                let mut records = vec![
                    marker(ROOT_CENTERS),
                    row("rCenter", centers(flags, counts)),
                    marker(GROWTH_TIMES),
                    row(
                        "iRFak",
                        vec![
                            int("iRFak", 9),
                            float("tRMin", 9),
                            float("tRMed", 9),
                            float("tRMax", 9),
                            float("tPeriod", 9),
                        ],
                    ),
                    marker(GROWTH_DEPTHS),
                    row("ZRMin", floats(&["ZRMin", "ZRMed", "ZRMax"], 9)),
                ];
                if flags.horizontal {
                    records.push(marker(GROWTH_WIDTHS));
                    records.push(row("rRMin", floats(&["rRMin", "rRMax"], 9)));
                }
                records
            })
        }
        SelectorEnd => Some(vec![marker(SELECTOR_END)]),

        // Dimensio and Meshtria columns are packed; fields after the first
        // are one narrower to absorb the separator.
        Dimensions => Some(vec![
            marker(DIMENSIONS),
            row(
                "NumNPD",
                [
                    "NumNPD", "NumElD", "NumBPD", "MBandD", "NSeepD", "NumSPD", "NDrD", "NElDrD",
                    "NMatD", "NObsD", "NSD",
                ]
                .iter()
                .enumerate()
                .map(|(i, name)| int(name, if i == 0 { 8 } else { 7 }))
                .collect(),
            ),
        ]),

        MeshHeader => Some(vec![row(
            "mesh_header",
            std::iter::once(int("NumNP", 10))
                .chain(repeat(int("NumNP", 9), 4))
                .collect(),
        )]),
        MeshNodes => Some(vec![table(
            "mesh_nodes",
            counts.nodes,
            vec![int("n", 6), float("x", 13), float("z", 13)],
        )]),
        MeshElements => Some(vec![
            marker(EDGES),
            marker(""),
            marker(ELEMENTS),
            table(
                "mesh_elements",
                counts.elements,
                vec![int("e", 8), int("i", 12), int("j", 12), int("k", 12)],
            ),
        ]),
        MeshEnd => Some(vec![marker(MESH_END)]),

        BoundaryInfo => Some(vec![
            marker(BLOCK_J),
            marker(BOUNDARY_INFO),
            row(
                "NumBP",
                vec![
                    int("NumBP", 9),
                    int("NObs", 8),
                    flag("SeepF", 6),
                    flag("FreeD", 6),
                    flag("DrainF", 6),
                    flag("qQWLF", 6),
                ],
            ),
            marker(HEAD_SWITCHES),
            row(
                "Interp",
                flags_row(
                    &[
                        "Interp", "H/Flux", "H/Flx1", "Atm/H", "Seep/H", "Atm/WL", "Atm/SF",
                        "Snow",
                    ],
                    7,
                    6,
                ),
            ),
            marker(BOUNDARY_OPTIONS),
            row(
                "Gradient",
                flags_row(
                    &[
                        "Gradient",
                        "SubDrip",
                        "SurfDrip",
                        "SeepFace",
                        "TriggIrrig",
                        "WellBC",
                        "lDummy",
                        "lDummy",
                    ],
                    7,
                    6,
                ),
            ),
        ]),
        GradientBc => flags
            .gradient
            .then(|| vec![marker(GRADIENT), row("Grad", vec![float("Grad", 10)])]),
        SubsurfaceDrip => flags.subsurface_drip.then(|| {
            vec![
                marker(SUBSURFACE_DRIP),
                row("QDrip", floats(&["QDrip", "ExpDrip"], 10)),
            ]
        }),
        SurfaceDrip => flags.surface_drip.then(|| {
            vec![
                marker(SURFACE_DRIP),
                row(
                    "iDripCenter",
                    vec![int("iDripCenter", 10), int("iDripNode", 10)],
                ),
            ]
        }),
        SeepageFace => flags
            .seepage_face
            .then(|| vec![marker(SEEPAGE_FACE), row("hSeep", vec![float("hSeep", 10)])]),
        TriggeredIrrigation => flags.triggered_irrigation.then(|| {
            vec![
                marker(TRIGGERED_IRRIGATION),
                marker(IRRIGATION),
                row(
                    "iIrrig",
                    vec![
                        int("iIrrig", 7),
                        float("hIrrig", 10),
                        int("kIrrig", 7),
                        float("rIrrig", 10),
                        float("tIrrig", 10),
                        float("lIrrig", 10),
                    ],
                ),
            ]
        }),
        ReservoirType => flags
            .reservoir
            .then(|| vec![marker(RESERVOIR_TYPE), row("iWell", vec![int("iWell", 7)])]),
        ReservoirGeometry => flags.reservoir.then(|| {
            let mut fields = floats(&["zWBot", "zWInit", "RadiusW", "WellPump", "cWell"], 10);
            match flags.reservoir_kind {
                ReservoirKind::Well => {}
                ReservoirKind::Furrow => fields.extend(floats(&["TanAlfa", "HwMax"], 10)),
                ReservoirKind::Wetland => fields.extend(floats(&["zMax", "pp"], 10)),
            }
            vec![marker(RESERVOIR), row("zWBot", fields)]
        }),
        BoundaryNodes => Some(vec![
            marker(NODE_NUMBERS),
            wrapped("nNode", int("nNode", 7), counts.boundary_nodes, 10),
            marker(WIDTHS),
            wrapped("Width", float("Width", 7), counts.boundary_nodes, 10),
            marker(TRANSPIRATION_LENGTH),
            row("L_surf", vec![float("L_surf", 15)]),
        ]),
        ObservationNodes => (counts.observation_nodes > 0).then(|| {
            vec![
                marker(OBSERVATION_NODES),
                row("Obs_nodes", repeat(int("Node", 8), counts.observation_nodes)),
            ]
        }),
        FlowingParticles => Some(vec![marker(PARTICLES), row("NPart", vec![int("NPart", 5)])]),
        DrainInfo => flags.drains.then(|| {
            vec![
                marker(BLOCK_JB),
                marker(DRAINS),
                row("NDr", vec![int("NDr", 3), float("DrCorr", 3)]),
            ]
        }),
        DrainNodes => flags.drains.then(|| {
            vec![
                marker(DRAIN_NODES),
                row("ND", repeat(int("ND", 8), counts.drains())),
                marker(DRAIN_ELEMENT_COUNTS),
                row("NElD", repeat(int("NElD", 8), counts.drains())),
            ]
        }),
        DrainElements => flags.drains.then(|| {
            let mut records = vec![
                marker(DRAIN_DIMENSIONS),
                row("EfDim", floats(&["EfDim", "EfDim"], 10)),
                marker(DRAIN_ELEMENTS),
            ];
            records.extend(
                counts
                    .drain_elements
                    .iter()
                    .map(|n| row("KElDr", repeat(int("KElDr", 6), *n))),
            );
            records
        }),
        SoluteBoundaryCodes => solute.then(|| {
            vec![
                marker(BLOCK_JD),
                marker(SOLUTE_CODES),
                wrapped("KodCB", int("KodCB", 3), counts.boundary_nodes, 20),
            ]
        }),
        HeatBoundaryCodes => flags.heat.then(|| {
            vec![
                marker(BLOCK_JE),
                marker(HEAT_CODES),
                wrapped("KodTB", int("KodTB", 3), counts.boundary_nodes, 20),
            ]
        }),
        BoundaryEnd => Some(vec![marker(BOUNDARY_END)]),

        DomainNodes => {
            let mut fields = vec![
                int("n", 10),
                int("Code", 6),
                float("h", 11),
                float("Q", 13),
                int("M", 4),
                float("Beta", 8),
                float("Axz", 8),
                float("Bxz", 8),
                float("Dxz", 8),
                float("Temp", 11),
            ];
            fields.extend(repeat(float("Conc", 13), counts.solutes));
            Some(vec![
                marker(BLOCK_H),
                marker(SOLUTES_EQUILIBRIUM),
                row("NS", vec![int("NS", 9), int("Equilibrium", 4)]),
                marker(NODAL_INFORMATION),
                marker(NODES),
                table("nodes", counts.nodes, fields),
            ])
        }
        DomainElements => Some(vec![
            marker(BLOCK_I),
            marker(ELEMENT_INFORMATION),
            table(
                "elements",
                counts.elements,
                vec![
                    int("e", 10),
                    float("Angle", 6),
                    float("AnizA1", 6),
                    float("AnizA2", 6),
                    int("LayNum", 5),
                ],
            ),
        ]),
        DomainEnd => Some(vec![marker(DOMAIN_END)]),

        AtmosphereInfo => flags.atmosphere.then(|| {
            vec![
                marker(BLOCK_K),
                marker(ATMOSPHERE_INFO),
                row("MaxAL", vec![int("MaxAL", 7), int("BC_Cycles", 6)]),
                marker(CRITICAL_HEAD),
                row("hCritS", vec![float("hCritS", 7)]),
            ]
        }),
        AtmosphereRecords => flags.atmosphere.then(|| {
            let header = ATMOSPHERE_COLUMNS
                .iter()
                .map(|name| format!("{:>11}", name))
                .collect::<Vec<_>>()
                .join(" ");
            vec![
                marker(header),
                table(
                    "records",
                    counts.atmosphere_records,
                    ATMOSPHERE_COLUMNS.iter().map(|name| float(name, 11)).collect(),
                ),
            ]
        }),
        AtmosphereEnd => flags.atmosphere.then(|| vec![marker(ATMOSPHERE_END)]),
    }
}

fn root_distribution(flags: &FeatureFlags, counts: &Counts) -> Vec<Record> {
    let mut records = Vec::new();
    if flags.zone_shape == RootZoneShape::Vrugt {
        records.push(marker(VRUGT_DEPTH));
        records.push(row("rZm", floats(&["rZm", "rZ0", "rA"], 9)));
        if flags.horizontal {
            let mut fields = floats(&["rRm", "rR0", "rB"], 9);
            fields.extend(centers(flags, counts));
            records.push(marker(VRUGT_WIDTH));
            records.push(row("rRm", fields));
        }
        return records;
    }

    match flags.depth_entry {
        RootDepthEntry::Constant => {
            records.push(marker(ROOT_DEPTH));
            records.push(row("RootDepth", vec![float("RootDepth", 9)]));
            if flags.horizontal {
                // half width is repeated for both sides of the plant
                let mut fields = floats(&["RootHalfWidth", "RootHalfWidth"], 9);
                fields.extend(centers(flags, counts));
                records.push(row("RootHalfWidth", fields));
            }
        }
        RootDepthEntry::Table => {
            records.push(marker(ROOT_CENTERS));
            records.push(row("rCenter", centers(flags, counts)));
        }
        RootDepthEntry::GrowthFunction => {}
    }
    records
}

#[cfg(test)]
mod test {
    use {
        super::*,
        crate::parameters::{Hysteresis, Parameters, TransportModel},
    };

    fn sections(params: &Parameters) -> Vec<Section> {
        resolve(&FeatureFlags::of(params), &Counts::of(params))
    }

    fn present(params: &Parameters, id: SectionId) -> bool {
        sections(params)
            .iter()
            .find(|section| section.id == id)
            .map(Section::is_present)
            .unwrap_or(false)
    }

    fn material_width(params: &Parameters) -> usize {
        let section = resolve_section(
            SectionId::Materials,
            &FeatureFlags::of(params),
            &Counts::of(params),
        );
        section
            .records()
            .iter()
            .find(|record| record.name() == Some("materials"))
            .map(Record::width)
            .unwrap()
    }

    #[test]
    fn sections_follow_file_order() {
        let files = SectionId::ALL
            .iter()
            .map(|id| id.file())
            .collect::<Vec<_>>();
        let mut order = files.clone();
        order.dedup();
        assert_eq!(order, DeckFile::ALL.to_vec());
    }

    #[test]
    fn material_width_by_variant() {
        let mut params = Parameters::default();
        assert_eq!(material_width(&params), 7);

        params
            .hydraulic
            .set_model(HydraulicModel::ModifiedVanGenuchten);
        assert_eq!(material_width(&params), 11);

        params.hydraulic.set_model(HydraulicModel::DualPorosityHead);
        assert_eq!(material_width(&params), 12);
    }

    #[test]
    fn hysteresis_adds_section_and_columns() {
        let mut params = Parameters::default();
        assert!(!present(&params, SectionId::Hysteresis));

        params.hydraulic.set_hysteresis(Hysteresis::Retention);
        assert!(present(&params, SectionId::Hysteresis));
        assert_eq!(material_width(&params), 11);
    }

    #[test]
    fn solute_sections_gated() {
        let mut params = Parameters::default();
        let solute_sections = [
            SectionId::SoluteInfo,
            SectionId::SoluteMaterials,
            SectionId::SoluteReactions,
            SectionId::SoluteBoundary,
            SectionId::SoluteBoundaryCodes,
        ];
        assert!(solute_sections.iter().all(|id| !present(&params, *id)));

        params.solute.enabled = true;
        assert!(solute_sections.iter().all(|id| present(&params, *id)));
        assert!(!present(&params, SectionId::SoluteTemperature));
        assert!(!present(&params, SectionId::Fumigant));
        assert!(!present(&params, SectionId::WaterContentTables));

        params.solute.temperature_dependent = true;
        params.set_fumigant(true);
        assert!(present(&params, SectionId::SoluteTemperature));
        assert!(present(&params, SectionId::Fumigant));
        assert!(!present(&params, SectionId::FumigantInjection));

        params.set_additional_fumigant(true).unwrap();
        assert!(present(&params, SectionId::FumigantInjection));
    }

    #[test]
    fn reaction_header_follows_bacteria() {
        let mut params = Parameters::default();
        params.solute.enabled = true;
        params.solute.bacteria = true;
        params.solute.filtration = true;
        params.set_transport(TransportModel::Standard);

        let section = resolve_section(
            SectionId::SoluteReactions,
            &FeatureFlags::of(&params),
            &Counts::of(&params),
        );
        assert!(section
            .records()
            .contains(&Record::Marker(REACTIONS_FILTRATION.to_owned())));
    }

    #[test]
    fn root_uptake_branches() {
        let mut params = Parameters::default();
        params.root_uptake.enabled = true;
        assert!(present(&params, SectionId::FeddesUptake));
        assert!(!present(&params, SectionId::SShapeUptake));
        assert!(!present(&params, SectionId::SoluteStress));

        params.root_uptake.model = UptakeModel::SShape;
        params.solute.enabled = true;
        assert!(!present(&params, SectionId::FeddesUptake));
        assert!(present(&params, SectionId::SShapeUptake));
        assert!(present(&params, SectionId::SoluteStress));
        assert!(present(&params, SectionId::OsmoticCoefficients));
        assert!(!present(&params, SectionId::SoluteStressModel));
    }

    #[test]
    fn root_growth_branches() {
        let mut params = Parameters::default();
        params.root_growth.enabled = true;
        assert!(present(&params, SectionId::RootGrowthFunction));
        assert!(!present(&params, SectionId::RootDistribution));

        params.root_growth.depth_entry = RootDepthEntry::Table;
        assert!(present(&params, SectionId::RootDepthCount));
        assert!(present(&params, SectionId::RootDepthTable));
        assert!(present(&params, SectionId::RootDistribution));
        assert!(!present(&params, SectionId::RootGrowthFunction));

        params.root_growth.zone_shape = RootZoneShape::Vrugt;
        params.root_growth.horizontal = true;
        params.root_growth.plants = 2;
        let section = resolve_section(
            SectionId::RootDistribution,
            &FeatureFlags::of(&params),
            &Counts::of(&params),
        );
        let widths = section
            .records()
            .iter()
            .filter_map(|record| record.name().map(|_| record.width()))
            .collect::<Vec<_>>();
        assert_eq!(widths, vec![3, 5]);
    }

    #[test]
    fn atmosphere_file_gated() {
        let mut params = Parameters::default();
        assert!(sections(&params)
            .iter()
            .filter(|section| section.id.file() == DeckFile::Atmosph)
            .all(|section| !section.is_present()));

        params.atmosphere.enabled = true;
        assert!(present(&params, SectionId::AtmosphereEnd));
    }

    #[test]
    fn reservoir_geometry_by_kind() {
        let mut params = Parameters::default();
        params.boundary.reservoir = true;
        params.boundary.well.kind = ReservoirKind::Furrow;
        let section = resolve_section(
            SectionId::ReservoirGeometry,
            &FeatureFlags::of(&params),
            &Counts::of(&params),
        );
        assert_eq!(section.records()[1].width(), 7);
    }
}
