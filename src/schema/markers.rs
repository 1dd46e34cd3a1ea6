//! Literal header lines of the deck files.

// Section banners
pub const BLOCK_A: &str =
    "*** BLOCK A: BASIC INFORMATION *****************************************";
pub const BLOCK_B: &str =
    "*** BLOCK B: MATERIAL INFORMATION **************************************";
pub const BLOCK_C: &str =
    "*** BLOCK C: TIME INFORMATION ******************************************";
pub const BLOCK_D: &str =
    "*** BLOCK D: SOLUTE TRANSPORT INFORMATION *****************************************************";
pub const BLOCK_E: &str =
    "*** BLOCK E: HEAT TRANSPORT INFORMATION *********************************************************";
pub const BLOCK_F: &str =
    "*** BLOCK F: ROOT WATER UPTAKE INFORMATION *****************************";
pub const BLOCK_D_ROOT_GROWTH: &str =
    "*** BLOCK D: ROOT GROWTH INFORMATION ***********************************";
pub const SELECTOR_END: &str =
    "*** END OF INPUT FILE 'SELECTOR.IN' ************************************";
pub const BLOCK_J: &str =
    "*** BLOCK J: BOUNDARY INFORMATION *********************************************";
pub const BLOCK_JB: &str =
    "*** BLOCK Jb: DRAIN INFORMATION *****************************************************";
pub const BLOCK_JD: &str =
    "*** BLOCK J-D: Solute transport boundary conditions *****************************";
pub const BLOCK_JE: &str =
    "*** BLOCK J-E: Heat transport boundary conditions *******************************";
pub const BOUNDARY_END: &str =
    "*** End of input file 'BOUNDARY.IN' *******************************************";
pub const BLOCK_H: &str =
    "*** BLOCK H: DOMAIN INFORMATION ******************************************************";
pub const BLOCK_I: &str =
    "*** BLOCK I: ELEMENT INFORMATION ******************************************************";
pub const DOMAIN_END: &str =
    "*** End of input file 'DOMAIN.IN' ****************************************************";
pub const BLOCK_K: &str =
    "*** BLOCK K: ATMOSPHERIC INFORMATION  **********************************";
pub const ATMOSPHERE_END: &str =
    "*** END OF INPUT FILE 'ATMOSPH.IN' *************************************";
pub const MESH_END: &str =
    "*** End of File *************************************************************************************************************";

// Selector.in
pub const HEADING: &str = "Heading";
pub const UNITS: &str = "LUnit  TUnit  MUnit  (indicated units are obligatory for all input data)";
pub const KAT: &str = "Kat (0:horizontal plane, 1:axisymmetric vertical flow, 2:vertical plane)";
pub const ITERATION: &str = "MaxIt   TolTh   TolH InitH/W  (max. number of iterations and tolerances)";
pub const MAIN_FLAGS: &str =
    "lWat lChem lSink Short Inter lScrn AtmIn lTemp lWTDep lEquil lExtGen lInv";
pub const MODULE_FLAGS: &str = "lUnsatCh lCFSTr  lHP2  m_lActRSU lRootGr lDummy  lDummy";
pub const PRINT: &str = " PrintStep  PrintInterval lEnter";
pub const MATERIAL_INFO: &str = "NMat    NLay    hTab1   hTabN     NAniz";
pub const MODEL: &str = "    Model   Hysteresis";
pub const IKAPPA: &str = "   iKappa";
pub const MATERIALS: &str = "  thr    ths   Alfa     n    Ks      l";
pub const TIME_STEP: &str =
    "        dt       dtMin       dtMax     DMul    DMul2  ItMin ItMax  MPL";
pub const TIME_RANGE: &str = "      tInit        tMax";
pub const PRINT_TIMES: &str = "TPrint(1),TPrint(2),...,TPrint(MPL)";
pub const SOLUTE_INFO: &str = " Epsi  lUpW  lArtD lTDep    cTolA    cTolR   MaxItC    PeCr  Nu.ofSolutes Tortuosity Bacter Filtration";
pub const SOLUTE_FLAGS: &str = "   lWatDep    lInitM   lInitEq    lTortM    lFumigant lDummy    lDummy    lDummy    lDummy    lDummy    lDummy";
pub const SOLUTE_SOIL: &str =
    "     Bulk.d.     DisperL.      DisperT     Frac      ThImob (1..NMat)";
pub const DIFFUSION: &str = "         DifW       DifG                n-th solute";
pub const REACTIONS: &str = "         Ks          Nu        Beta       Henry       SnkL1       SnkS1       SnkG1       SnkL1'      SnkS1'      SnkG1'      SnkL0       SnkS0       SnkG0        Alfa";
pub const REACTIONS_ATTACHMENT: &str = "         Ks          Nu        Beta       Henry       SnkL1       SnkS1       iPsi2       iPsi1      SMax2      AttachS2      DetachS2       SMax1       AttachS1        DetachS1";
pub const REACTIONS_FILTRATION: &str = "         Ks          Nu        Beta       Henry       SnkL1       SnkS1       D_soil       D_virus      SMax2      Coll.Eff2      DetachS2       SMax1       Coll.Eff1        DetachS1";
pub const TEMPERATURE_DEPENDENCE: &str = "Temperature Dependence";
pub const SOLUTE_BOUNDARY: &str = "       cTop        cBot";
pub const PULSE: &str = "      tPulse";
pub const ADD_FUMIGANT: &str = "  AddFumigant";
pub const FUMIGANT_DOSE: &str = "   AddFumTime    AddFumMass";
pub const FUMIGANT_REGION: &str =
    "   AddFumMinX    AddFumMaxX    AddFumMinZ    AddFumMaxZ    AddFumMinY    AddFumMaxY";
pub const WATER_CONTENT_DEPENDENCE: &str = "Water Content Dependence";
pub const PARAMETER_COUNT: &str = "Number of Parameters";
pub const WATER_CONTENT: &str = "      SnkL1       SnkS1       SnkG1       SnkL1'      SnkS1'      SnkG1'      SnkL0       SnkS0       SnkG0";
pub const HEAT_PARAMETERS: &str = "    Qn      Qo         Disper.       B1          B2          B3          Cn          Co           Cw";
pub const HEAT_BOUNDARY: &str = "       TTop        TBot";
pub const HEAT_AMPLITUDE: &str = "      tAmpl     tPeriod";
pub const UPTAKE_MODEL: &str = "     Model  (0 - Feddes, 1 - S shape)  Critical Stress Index";
pub const FEDDES: &str = "       P0       P2H       P2L       P3          r2H        r2L";
pub const POPTM: &str = "POptm(1),POptm(2),...,POptm(NMat)";
pub const S_SHAPE: &str = "       P50       P3          PW";
pub const SOLUTE_REDUCTION: &str = "     Solute Reduction";
pub const ADDITIVE: &str = "     Additive * multiplicative";
pub const OSMOTIC_MULTIPLICATIVE: &str = "     c50        p             Osmotic Coefficients";
pub const OSMOTIC_ADDITIVE: &str = "             Osmotic Coefficients";
pub const ACTIVE_UPTAKE: &str = "      OmegaS     SPot     KM    cMin    OmegaW";
pub const ROOT_SHAPE: &str = "iRootZone Shape iRootDepthEntry";
pub const PLANTS: &str = " Horizontal    NPlants";
pub const VRUGT_DEPTH: &str = "      rZm      rZ0       rA";
pub const VRUGT_WIDTH: &str = "      rRm      rR0       rB        rCenter(nPlant)";
pub const ROOT_DEPTH: &str = " RootDepth  RootHalfWidth  rCenter(nPlant)";
pub const ROOT_CENTERS: &str = " rCenter(nPlant)";
pub const GROWTH_COUNT: &str = " nGrowth";
pub const GROWTH_TABLE: &str = "      Time  RootDepth";
pub const GROWTH_TIMES: &str = "     iRFak     tRMin     tRMed     tRMax     tPeriod";
pub const GROWTH_DEPTHS: &str = "     ZRMin     ZRMed     ZRMax";
pub const GROWTH_WIDTHS: &str = "     rRMin      rRMax";

// Dimensio.in
pub const DIMENSIONS: &str = "  NumNPD  NumElD  NumBPD  MBandD  NSeepD  NumSPD    NDrD  NElDrD   NMatD   NObsD     NSD   NAnis";

// Meshtria.txt
pub const EDGES: &str = "Edges";
pub const ELEMENTS: &str = "       e            i            j            k";

// Boundary.in
pub const BOUNDARY_INFO: &str = "    NumBP     NObs  SeepF  FreeD DrainF  qQWLF";
pub const HEAD_SWITCHES: &str = " Interp H/Flux H/Flx1  Atm/H Seep/H Atm/WL Atm/SF   Snow";
pub const BOUNDARY_OPTIONS: &str = "Gradient SubDrip SurfDrip SeepFace TriggIrrig   WellBC";
pub const GRADIENT: &str = "     Grad";
pub const SUBSURFACE_DRIP: &str = "      Flux   Exponent";
pub const SURFACE_DRIP: &str = " Direction     Center";
pub const SEEPAGE_FACE: &str = " Seepage Face Pressure";
pub const TRIGGERED_IRRIGATION: &str = " Triggered Irrigation";
pub const IRRIGATION: &str = " Obs.Node  Pressure Boundary     Flux     Duration     LagTime";
pub const RESERVOIR_TYPE: &str = "Type of reservoir: =1: Well; =2: Furrow; =3: Wetland";
pub const RESERVOIR: &str = "      zWBot     zWInit    RadiusW   WellPump      cWell";
pub const NODE_NUMBERS: &str = "Node Number Array";
pub const WIDTHS: &str = "Width Array";
pub const TRANSPIRATION_LENGTH: &str = "Length of soil surface associated with transpiration";
pub const OBSERVATION_NODES: &str = "Observation nodes. Node(1,....,NObs)";
pub const PARTICLES: &str = "Number of Flowing points and their indeces";
pub const DRAINS: &str = "NDr    DrCorr                                         (number of drains)";
pub const DRAIN_NODES: &str = "ND(1,..,NDr)                              (global numbers of the drains)";
pub const DRAIN_ELEMENT_COUNTS: &str =
    "NElD(1,..,NDr)                (number of elements surrounding the drain)";
pub const DRAIN_DIMENSIONS: &str =
    "EfDim(1..2) (effect.diameter and dimension of square representing drain)";
pub const DRAIN_ELEMENTS: &str =
    "KElDr(i,1),..,KElDr(i,NElD(i))  (element numbers surrounding i-th drain)";
pub const SOLUTE_CODES: &str = "KodCB(1),KodCB(2),.....,KodCB(NumBP)";
pub const HEAT_CODES: &str = "KodTB(1),KodTB(2),.....,KodTB(NumBP)";

// Domain.dat
pub const SOLUTES_EQUILIBRIUM: &str = "Number of Solutes   Equilibrium";
pub const NODAL_INFORMATION: &str = "Nodal Information";
pub const NODES: &str = "         n   Code          h              Q    M     Beta      Axz      Bxz      Dxz        Temp   Conc(1..NS)";
pub const ELEMENT_INFORMATION: &str = "         e  Angle  AnizA1 AnizA2 LayNum";

// Atmosph.in
pub const ATMOSPHERE_INFO: &str =
    "   MaxAL  BC_Cycles         (MaxAL = number of atmospheric data-records)";
pub const CRITICAL_HEAD: &str =
    " hCritS                 (max. allowed pressure head at the soil surface)";
pub const ATMOSPHERE_COLUMNS: [&str; 18] = [
    "tAtm", "Prec", "rSoil", "rRoot", "hCritA", "rt", "ht", "rt", "ht", "rt", "ht", "rt", "ht",
    "TValue1", "TValue2", "cValue1", "cValue2", "cValue3",
];
