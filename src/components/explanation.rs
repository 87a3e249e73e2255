//! Static copy for the model explanation tab and the brand rankings footer.

pub const MODEL_TITLE: &str = "Model Explanation";

pub const MODEL_PARAGRAPHS: [&str; 5] = [
    "This viewership model uses several years of college football TV ratings to estimate \
     how many people would watch a hypothetical matchup.",
    "The core idea is simple: certain factors consistently influence TV audiences. These \
     include team brand power, rankings, network, time slot, rivalry status, and the quality \
     of competing games at the same time. The model learns how much each of these variables \
     has historically moved viewership up or down.",
    "To do this accurately, the model uses a statistical technique called \"log-transformed \
     regression,\" which helps stabilize variance and makes predictions more reliable. After \
     the model makes a prediction in log-space, a correction called \"smearing\" is applied so \
     the numbers match real-world viewer counts.",
    "Rankings and conferences help quantify team quality. Network indicators represent the \
     impact of national TV exposure. Time-slot flags (e.g., Primetime, Friday, Saturday Early) \
     capture when people tend to watch more or less football. Rivalry indicators tell the \
     model when to expect major viewership spikes that don't depend on record.",
    "Finally, the model calculates a confidence interval, offering a reasonable upper and lower \
     range to show uncertainty around each prediction. While no model is perfect, this approach \
     provides a consistent, transparent, and data-driven way to forecast viewership.",
];

pub const BRAND_BLURB: &str = "Lift % shows how much a team increases expected TV viewership, \
    compared to a neutral baseline team, independent of structural variables like network, \
    time-slot, opponent, rankings, and competing games.";

pub const LIFT_HEADING: &str = "What is Lift %?";

pub const LIFT_EXPLAINER: &str = "Lift % measures a team's intrinsic drawing power on national \
    television. The model controls for network, time slot, rankings, rivalry status, \
    competitiveness, and competing games, isolating only the brand effect. A Lift % of +150%, \
    for example, means adding that team to a neutral baseline matchup would be expected to \
    increase viewership by 150% (i.e., multiply the audience by 2.5x). Higher Lift % values \
    therefore represent stronger national brands that consistently attract larger TV audiences.";
