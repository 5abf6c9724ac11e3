use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "th",
    about = concat!("[^] trailhead v", env!("CARGO_PKG_VERSION"), " - plan the trip, carry less"),
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different data directory
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show quick stats for the current project
    Status,
    /// Manage projects
    Project(ProjectCmd),
    /// Manage participants of the current project
    Participant(ParticipantCmd),
    /// Project chat
    Chat(ChatCmd),
    /// Manage the gear list
    Gear(GearCmd),
    /// Manage the meal plan
    Meal(MealCmd),
    /// Save and apply meal-plan templates
    Template(TemplateCmd),
    /// Trip diary
    Diary(DiaryCmd),
    /// Show the pre-departure checklist
    Checklist,
    /// Show the weight report and carry-limit check
    Weight,
    /// Show nutrition totals
    Nutrition,
    /// Estimate water needs for a day on the move
    Water(WaterArgs),
    /// List the recipe catalog
    Dishes,
    /// Show the first-aid reference
    Guide,
    /// Cross-instance synchronization
    Sync(SyncCmd),
    /// Remote backup and multi-device sync
    Remote(RemoteCmd),
}

// ---------------------------------------------------------------------------
// Project commands
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ProjectCmd {
    #[command(subcommand)]
    pub action: ProjectAction,
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// List all projects
    List,
    /// Create a project and make it current
    Create {
        title: String,
        /// Start date (YYYY-MM-DD)
        start: String,
        /// End date (YYYY-MM-DD)
        end: String,
    },
    /// Delete a project by id
    Delete { id: String },
    /// Switch the current project
    Switch { id: String },
    /// Update settings of the current project
    Set {
        #[arg(long)]
        title: Option<String>,
        /// Start date (YYYY-MM-DD); requires --end
        #[arg(long, requires = "end")]
        start: Option<String>,
        /// End date (YYYY-MM-DD); requires --start
        #[arg(long, requires = "start")]
        end: Option<String>,
        /// Trip type: hiking, ski, water
        #[arg(long = "type")]
        trip_type: Option<String>,
        /// Season: spring, summer, autumn, winter
        #[arg(long)]
        season: Option<String>,
        /// Body type: light, medium, strong
        #[arg(long)]
        body: Option<String>,
    },
}

// ---------------------------------------------------------------------------
// Participant / chat commands
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ParticipantCmd {
    #[command(subcommand)]
    pub action: ParticipantAction,
}

#[derive(Subcommand)]
pub enum ParticipantAction {
    /// List participants
    List,
    /// Add a participant
    Add {
        name: String,
        /// Role: editor or viewer
        #[arg(long, default_value = "editor")]
        role: String,
    },
    /// Remove a participant by id
    Remove { id: String },
}

#[derive(Args)]
pub struct ChatCmd {
    #[command(subcommand)]
    pub action: ChatAction,
}

#[derive(Subcommand)]
pub enum ChatAction {
    /// Show the chat log
    List,
    /// Post a message
    Post {
        message: String,
        #[arg(long, default_value = "You")]
        author: String,
    },
}

// ---------------------------------------------------------------------------
// Gear commands
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct GearCmd {
    #[command(subcommand)]
    pub action: GearAction,
}

#[derive(Subcommand)]
pub enum GearAction {
    /// List gear items
    List,
    /// Add a gear item
    Add {
        name: String,
        #[arg(long, default_value = "Misc")]
        category: String,
        /// Weight in kilograms
        #[arg(long, default_value_t = 0.0)]
        weight: f64,
        /// Responsible participant id
        #[arg(long)]
        responsible: Option<String>,
        #[arg(long, default_value = "")]
        hint: String,
    },
    /// Remove a gear item by id
    Remove { id: String },
    /// Mark a gear item packed (or unpacked with --undo)
    Pack {
        id: String,
        #[arg(long)]
        undo: bool,
    },
    /// Assign a gear item to a participant (omit --to to unassign)
    Assign {
        id: String,
        #[arg(long)]
        to: Option<String>,
    },
    /// Update a gear item's weight
    SetWeight { id: String, kg: f64 },
    /// Fill the list from the gear library for this trip type and season
    Autofill,
}

// ---------------------------------------------------------------------------
// Meal / template commands
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct MealCmd {
    #[command(subcommand)]
    pub action: MealAction,
}

#[derive(Subcommand)]
pub enum MealAction {
    /// List meal entries with their nutrition
    List,
    /// Add a meal entry
    Add {
        /// Dish id from the recipe catalog (see `th dishes`)
        dish: String,
        #[arg(long, default_value_t = 1)]
        day: u32,
        /// Meal type: breakfast, lunch, dinner, snack
        #[arg(long, default_value = "breakfast")]
        meal: String,
        #[arg(long, default_value_t = 1.0)]
        servings: f64,
    },
    /// Remove a meal entry by id
    Remove { id: String },
    /// Mark a meal entry prepared (or not with --undo)
    Pack {
        id: String,
        #[arg(long)]
        undo: bool,
    },
    /// Clear the whole meal plan
    Clear,
}

#[derive(Args)]
pub struct TemplateCmd {
    #[command(subcommand)]
    pub action: TemplateAction,
}

#[derive(Subcommand)]
pub enum TemplateAction {
    /// List community and user templates
    List,
    /// Save the current meal plan as a template
    Save { name: String },
    /// Replace the meal plan with a template's entries
    Apply { id: String },
}

// ---------------------------------------------------------------------------
// Diary commands
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct DiaryCmd {
    #[command(subcommand)]
    pub action: DiaryAction,
}

#[derive(Subcommand)]
pub enum DiaryAction {
    /// List diary entries, newest first
    List,
    /// Add a diary entry
    Add {
        text: String,
        /// Coordinate string, e.g. "48.15990, 24.50030"
        #[arg(long)]
        geotag: Option<String>,
        /// Embedded photo payload
        #[arg(long)]
        photo: Option<String>,
    },
    /// Remove a diary entry by id
    Remove { id: String },
}

// ---------------------------------------------------------------------------
// Tools / sync / remote
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct WaterArgs {
    /// Weather: cold, mild, hot
    #[arg(long, default_value = "mild")]
    pub weather: String,
    /// Activity level: low, medium, high
    #[arg(long, default_value = "medium")]
    pub activity: String,
    /// Hours on the move
    #[arg(long, default_value_t = 6.0)]
    pub hours: f64,
    #[arg(long, default_value_t = 1)]
    pub people: u32,
}

#[derive(Args)]
pub struct SyncCmd {
    #[command(subcommand)]
    pub action: SyncAction,
}

#[derive(Subcommand)]
pub enum SyncAction {
    /// Show this instance's origin id and the last change signal
    Status,
    /// Run one poll-and-reconcile pass against foreign changes
    Poll,
}

#[derive(Args)]
pub struct RemoteCmd {
    #[command(subcommand)]
    pub action: RemoteAction,
}

#[derive(Subcommand)]
pub enum RemoteAction {
    /// Show remote configuration and authentication state
    Status,
    /// Mirror local projects to the remote store
    Push,
    /// Replace local projects with the remote store's copy
    Pull,
}
