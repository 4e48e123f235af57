use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use cafe_pos_client::{
    api::ApiClient,
    config::ClientConfig,
    logging,
    models::{
        cashier_shift::VarianceReason,
        handover::{CreateHandoverRequest, HandoverType, ReconcileRequest, Responsibility},
        shift::{ShiftType, StartShiftRequest},
        user::Credentials,
    },
    session::SessionHandle,
    storage::{KeyValueStore, KeyringStore, SqliteStore},
    stores::{AuthStore, CashierShiftStore, CashierStore, ManagerStore, ShiftStore},
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ClientConfig::from_env();
    let _guard = logging::init(config.log_dir.as_deref());

    let context = CliContext::initialize(config, cli.keyring)?;

    match cli.command {
        Commands::Login(args) => handle_login(context, args).await?,
        Commands::Logout => handle_logout(context)?,
        Commands::Whoami => handle_whoami(&context)?,
        Commands::Shift(command) => handle_shift_command(context, command).await?,
        Commands::Handover(command) => handle_handover_command(context, command).await?,
        Commands::Approvals(command) => handle_approvals_command(context, command).await?,
        Commands::CashierShift(command) => handle_cashier_shift_command(context, command).await?,
    }

    Ok(())
}

#[derive(Parser)]
#[command(name = "pos-client", about = "Café POS client for shifts and cash handovers", version)]
struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Keep the session in the OS keyring instead of the data directory"
    )]
    keyring: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and persist the session
    Login(LoginArgs),
    /// Drop the persisted session
    Logout,
    /// Show the signed-in user
    Whoami,
    #[command(subcommand)]
    Shift(ShiftCommands),
    #[command(subcommand)]
    Handover(HandoverCommands),
    #[command(subcommand)]
    Approvals(ApprovalCommands),
    #[command(subcommand)]
    CashierShift(CashierShiftCommands),
}

#[derive(Args)]
struct LoginArgs {
    #[arg(long)]
    username: String,
    #[arg(long, env = "POS_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Subcommand)]
enum ShiftCommands {
    /// Show the open waiter/barista shift
    Current,
    Start {
        #[arg(long, value_parser = parse_shift_type)]
        shift_type: ShiftType,
        #[arg(long, default_value_t = 0.0)]
        start_cash: f64,
    },
    End {
        #[arg(long)]
        end_cash: f64,
    },
}

#[derive(Subcommand)]
enum HandoverCommands {
    /// Request a handover from the open shift
    Create {
        #[arg(long)]
        amount: f64,
        #[arg(long, value_parser = parse_handover_type, default_value = "PARTIAL")]
        handover_type: HandoverType,
        #[arg(long, default_value = "")]
        notes: String,
        /// Also end the shift once the handover is recorded
        #[arg(long, action = ArgAction::SetTrue)]
        end_shift: bool,
    },
    /// Handovers waiting for a cashier
    Pending,
    QuickConfirm {
        id: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    Reconcile {
        id: String,
        #[arg(long)]
        actual_amount: f64,
        #[arg(long)]
        reason: String,
        #[arg(long, value_parser = parse_responsibility, default_value = "UNKNOWN")]
        responsibility: Responsibility,
        #[arg(long, default_value = "")]
        notes: String,
    },
    Reject {
        id: String,
        #[arg(long)]
        reason: String,
    },
}

#[derive(Subcommand)]
enum ApprovalCommands {
    /// Discrepancies waiting for a manager
    List,
    Decide {
        id: String,
        #[arg(long, action = ArgAction::SetTrue, conflicts_with = "reject")]
        approve: bool,
        #[arg(long, action = ArgAction::SetTrue)]
        reject: bool,
        #[arg(long, default_value = "")]
        notes: String,
    },
}

#[derive(Subcommand)]
enum CashierShiftCommands {
    Start {
        #[arg(long)]
        starting_float: f64,
    },
    Current,
    /// Run the next step of the closure procedure
    CloseStep(CloseStepArgs),
}

#[derive(Args)]
struct CloseStepArgs {
    /// Counted drawer cash, needed for the record-cash step
    #[arg(long)]
    actual_cash: Option<f64>,
    /// Variance reason code, needed for the document-variance step
    #[arg(long)]
    variance_reason: Option<String>,
    #[arg(long, default_value = "")]
    notes: String,
}

fn parse_shift_type(value: &str) -> Result<ShiftType, String> {
    value.parse()
}

fn parse_handover_type(value: &str) -> Result<HandoverType, String> {
    value.parse()
}

fn parse_responsibility(value: &str) -> Result<Responsibility, String> {
    value.parse()
}

struct CliContext {
    config: ClientConfig,
    api: ApiClient,
    auth: AuthStore,
}

impl CliContext {
    fn initialize(config: ClientConfig, use_keyring: bool) -> Result<Self> {
        let storage: Arc<dyn KeyValueStore> = match (&config.data_dir, use_keyring) {
            (Some(dir), false) => Arc::new(
                SqliteStore::open(dir)
                    .with_context(|| format!("failed to open session store in {}", dir.display()))?,
            ),
            _ => Arc::new(KeyringStore),
        };

        let api = ApiClient::from_config(&config, SessionHandle::new())
            .context("failed to build HTTP client")?;
        let mut auth = AuthStore::new(api.clone(), storage);
        let restored = auth.init().context("failed to read stored session")?;
        debug!(restored, "session restore");

        Ok(Self { config, api, auth })
    }

    fn require_login(&self) -> Result<()> {
        if self.auth.is_authenticated() {
            Ok(())
        } else {
            Err(anyhow!("not signed in; run `pos-client login` first"))
        }
    }

    fn shifts(&self) -> ShiftStore {
        ShiftStore::new(self.api.clone())
    }

    fn cashier(&self) -> CashierStore {
        CashierStore::new(self.api.clone(), self.config.discrepancy_threshold)
    }

    fn manager(&self) -> ManagerStore {
        ManagerStore::new(self.api.clone(), self.config.discrepancy_threshold)
    }

    fn cashier_shifts(&self) -> CashierShiftStore {
        CashierShiftStore::new(self.api.clone())
    }
}

async fn handle_login(mut context: CliContext, args: LoginArgs) -> Result<()> {
    let credentials = Credentials {
        username: args.username,
        password: args.password,
    };
    let user = context
        .auth
        .login(&credentials)
        .await
        .context("failed to sign in")?;
    print_json(user)
}

fn handle_logout(mut context: CliContext) -> Result<()> {
    context.auth.logout().context("failed to clear stored session")?;
    print_json(&json!({ "signed_out": true }))
}

fn handle_whoami(context: &CliContext) -> Result<()> {
    context.require_login()?;
    print_json(&json!({
        "user": context.auth.user(),
        "can_manage_handovers": context.auth.can_manage_handovers(),
        "can_approve_discrepancies": context.auth.can_approve_discrepancies(),
    }))
}

async fn handle_shift_command(context: CliContext, command: ShiftCommands) -> Result<()> {
    context.require_login()?;
    let mut store = context.shifts();

    match command {
        ShiftCommands::Current => {
            let shift = store
                .fetch_current_shift()
                .await
                .context("failed to load current shift")?;
            print_json(&shift)
        }
        ShiftCommands::Start {
            shift_type,
            start_cash,
        } => {
            let request = StartShiftRequest::new(shift_type, start_cash);
            let shift = store
                .start_shift(&request)
                .await
                .context("failed to start shift")?;
            print_json(&shift)
        }
        ShiftCommands::End { end_cash } => {
            let id = open_shift_id(&mut store).await?;
            let shift = store
                .end_shift(&id, end_cash)
                .await
                .context("failed to end shift")?;
            print_json(&shift)
        }
    }
}

async fn open_shift_id(store: &mut ShiftStore) -> Result<String> {
    store
        .fetch_current_shift()
        .await
        .context("failed to load current shift")?
        .map(|shift| shift.id.clone())
        .ok_or_else(|| anyhow!("no open shift"))
}

async fn handle_handover_command(context: CliContext, command: HandoverCommands) -> Result<()> {
    context.require_login()?;

    match command {
        HandoverCommands::Create {
            amount,
            handover_type,
            notes,
            end_shift,
        } => {
            let mut store = context.shifts();
            let id = open_shift_id(&mut store).await?;
            store
                .fetch_pending_handover(&id)
                .await
                .context("failed to check for a pending handover")?;
            let request = CreateHandoverRequest::new(handover_type, amount).with_notes(notes);
            let handover = if end_shift {
                store.create_handover_and_end_shift(&id, &request).await
            } else {
                store.create_cash_handover(&id, &request).await
            }
            .context("failed to request handover")?;
            print_json(&handover)
        }
        HandoverCommands::Pending => {
            let mut store = context.cashier();
            let pending = store
                .fetch_pending_handovers()
                .await
                .context("failed to load pending handovers")?;
            print_json(&pending)
        }
        HandoverCommands::QuickConfirm { id, notes } => {
            let mut store = context.cashier();
            store
                .quick_confirm(&id, &notes)
                .await
                .context("failed to confirm handover")?;
            print_json(&store.today_handovers())
        }
        HandoverCommands::Reconcile {
            id,
            actual_amount,
            reason,
            responsibility,
            notes,
        } => {
            let mut store = context.cashier();
            let request = ReconcileRequest {
                actual_amount,
                discrepancy_reason: reason,
                responsibility,
                cashier_notes: notes,
            };
            store
                .reconcile_handover(&id, &request)
                .await
                .context("failed to reconcile handover")?;
            print_json(&store.today_handovers())
        }
        HandoverCommands::Reject { id, reason } => {
            let mut store = context.cashier();
            store
                .reject_handover(&id, &reason)
                .await
                .context("failed to reject handover")?;
            print_json(&store.today_handovers())
        }
    }
}

async fn handle_approvals_command(context: CliContext, command: ApprovalCommands) -> Result<()> {
    context.require_login()?;
    let mut store = context.manager();

    match command {
        ApprovalCommands::List => {
            let approvals = store
                .fetch_pending_approvals()
                .await
                .context("failed to load pending approvals")?;
            print_json(&approvals)
        }
        ApprovalCommands::Decide {
            id,
            approve,
            reject,
            notes,
        } => {
            if approve == reject {
                return Err(anyhow!("pass exactly one of --approve or --reject"));
            }
            store
                .approve_discrepancy(&id, approve, &notes)
                .await
                .context("failed to record decision")?;
            print_json(&store.pending_approvals())
        }
    }
}

async fn handle_cashier_shift_command(
    context: CliContext,
    command: CashierShiftCommands,
) -> Result<()> {
    context.require_login()?;
    let mut store = context.cashier_shifts();

    match command {
        CashierShiftCommands::Start { starting_float } => {
            let shift = store
                .start_cashier_shift(starting_float)
                .await
                .context("failed to start cashier shift")?;
            print_json(&shift)
        }
        CashierShiftCommands::Current => {
            let shift = store
                .fetch_current_cashier_shift()
                .await
                .context("failed to load cashier shift")?
                .cloned();
            print_json(&json!({
                "shift": shift,
                "next_step": store.closure_step(),
            }))
        }
        CashierShiftCommands::CloseStep(args) => run_closure_step(&mut store, args).await,
    }
}

async fn run_closure_step(store: &mut CashierShiftStore, args: CloseStepArgs) -> Result<()> {
    use cafe_pos_client::models::cashier_shift::ClosureStep;

    store
        .fetch_current_cashier_shift()
        .await
        .context("failed to load cashier shift")?;
    let step = store
        .closure_step()
        .ok_or_else(|| anyhow!("no open cashier shift"))?;
    debug!(step = step.label(), "closure step");

    let shift = match step {
        ClosureStep::InitiateClosure => store.initiate_closure().await,
        ClosureStep::RecordActualCash => {
            let actual = args
                .actual_cash
                .ok_or_else(|| anyhow!("--actual-cash is required to record the count"))?;
            store.record_actual_cash(actual).await
        }
        ClosureStep::DocumentVariance => {
            let reason = args
                .variance_reason
                .as_deref()
                .map(VarianceReason::from)
                .ok_or_else(|| anyhow!("--variance-reason is required to document the variance"))?;
            store.document_variance(reason, &args.notes).await
        }
        ClosureStep::ConfirmResponsibility => store.confirm_responsibility().await,
        ClosureStep::Close => store.close_shift().await,
        ClosureStep::Done => return Err(anyhow!("cashier shift is already closed")),
    }
    .with_context(|| format!("failed to {}", step.label().to_lowercase()))?;

    print_json(&json!({
        "shift": shift,
        "next_step": shift.next_closure_step(),
    }))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
