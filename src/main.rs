use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

use rootlocus::config::AppConfig;
use rootlocus::design::{GainDesign, GainSolver, PlantModel};
use rootlocus::scoring::ScoringClient;
use rootlocus::session::{login, LoginOutcome, Session};
use rootlocus::simulation::{ResponseMetrics, TraceExport};

#[derive(Parser)]
#[command(name = "rootlocus", version, about = "Root-locus PID design and grading")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging for this crate
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the plant and design target of an identifier
    Plant { id: String },
    /// Print the gain derivation and true gains
    Solve { id: String },
    /// Simulate a gain set and print response metrics
    Simulate {
        id: String,
        #[command(flatten)]
        gains: GainArgs,
        #[arg(long, default_value = "1")]
        set_point: String,
        #[arg(long, default_value = "1")]
        step_time: String,
        /// Write `<csv>_continuous.csv` and `<csv>_discrete.csv`
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Score a gain set and upload the errors
    Submit {
        id: String,
        #[command(flatten)]
        gains: GainArgs,
    },
    /// Export the cohort grades (admin)
    Grade {
        #[arg(long)]
        key: String,
        #[arg(long, default_value = "grades.csv")]
        out: PathBuf,
    },
    /// Log in: the admin key exports grades, any other identifier opens a session
    Login {
        id: String,
        #[arg(long, default_value = "grades.csv")]
        out: PathBuf,
    },
}

#[derive(Args)]
struct GainArgs {
    #[arg(long)]
    kp: String,
    #[arg(long)]
    ki: String,
    #[arg(long)]
    kd: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env = env_logger::Env::default().default_filter_or("info");
    let mut builder = env_logger::Builder::from_env(env);
    if cli.verbose {
        builder.filter(Some("rootlocus"), LevelFilter::Debug);
    }
    builder.init();

    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Command::Plant { id } => plant(&id),
        Command::Solve { id } => solve(&config, &id),
        Command::Simulate {
            id,
            gains,
            set_point,
            step_time,
            csv,
        } => simulate(&config, &id, &gains, &set_point, &step_time, csv.as_deref()),
        Command::Submit { id, gains } => submit(&config, &id, &gains),
        Command::Grade { key, out } => {
            if !config.is_admin(&key) {
                bail!("grading requires the admin key");
            }
            grade(&config, &out)
        }
        Command::Login { id, out } => match login(&config, &id)? {
            LoginOutcome::Admin => grade(&config, &out),
            LoginOutcome::Student(session) => {
                print_session(&session);
                Ok(())
            }
        },
    }
}

fn open_session(config: &AppConfig, id: &str) -> anyhow::Result<Session> {
    Ok(Session::new(
        id,
        GainSolver::new(config.zero_convention),
        config.simulation.clone(),
    )?)
}

fn plant(id: &str) -> anyhow::Result<()> {
    let id = rootlocus::session::validate_identifier(id)?;
    let model = PlantModel::from_identifier(id)?;
    println!("G(s)           = {}", model.plant());
    println!("overshoot      = {}%", model.target().overshoot_percent);
    println!("settling time  = {} s", model.target().settling_time);
    Ok(())
}

fn print_design(design: &GainDesign) {
    let p = design.dominant_pole;
    println!("zeta           = {:.6}", design.damping_ratio);
    println!("wn             = {:.6} rad/s", design.natural_frequency);
    println!("dominant pole  = {:.6} {:+.6}j", p.re, p.im);
    println!("pole angles    = {:.6} deg", design.pole_angle_sum);
    println!("zero angle     = {:.6} deg", design.required_angle);
    println!("zero           = s = -{:.6}", design.zero);
    if design.mirrored {
        println!("                 (mirrored from s = {:.6})", design.zero_location);
    }
    println!("KD             = {:.6}", design.kd_factor);
    println!("KI             = {:.6}", design.ki_factor);
    println!("Kp             = {:.6}", design.gains.kp);
    println!("Ki             = {:.6}", design.gains.ki);
    println!("Kd             = {:.6}", design.gains.kd);
}

fn solve(config: &AppConfig, id: &str) -> anyhow::Result<()> {
    let session = open_session(config, id)?;
    println!("G(s)           = {}", session.model().plant());
    println!("convention     = {}", config.zero_convention.as_str());
    print_design(session.true_design()?);
    Ok(())
}

fn print_metrics(label: &str, metrics: Option<ResponseMetrics>) {
    let Some(m) = metrics else {
        println!("{label}: empty trace");
        return;
    };
    let settling = m
        .settling_time
        .map_or_else(|| "not settled".to_string(), |t| format!("{t:.3} s"));
    println!(
        "{label}: final {:.4}, peak {:.4} at {:.3} s, overshoot {:.2}%, settling {}",
        m.final_value, m.peak, m.peak_time, m.overshoot_percent, settling
    );
}

fn simulate(
    config: &AppConfig,
    id: &str,
    gains: &GainArgs,
    set_point: &str,
    step_time: &str,
    csv: Option<&Path>,
) -> anyhow::Result<()> {
    let mut session = open_session(config, id)?;
    session.set_gains(&gains.kp, &gains.ki, &gains.kd)?;
    session.set_reference(set_point, step_time)?;

    let result = session.simulate()?;
    print_metrics(
        "continuous",
        ResponseMetrics::from_trace(
            &result.time_continuous,
            &result.setpoint_continuous,
            &result.output_continuous,
        ),
    );
    print_metrics(
        "discrete",
        ResponseMetrics::from_trace(
            &result.time_discrete,
            &result.setpoint_discrete,
            &result.output_discrete,
        ),
    );

    if let Some(stem) = csv {
        let (continuous, discrete) = result.save_csv(stem)?;
        println!("wrote {} and {}", continuous.display(), discrete.display());
    }
    Ok(())
}

fn submit(config: &AppConfig, id: &str, gains: &GainArgs) -> anyhow::Result<()> {
    let mut session = open_session(config, id)?;
    session.set_gains(&gains.kp, &gains.ki, &gains.kd)?;

    let client = ScoringClient::new(config.http_store()?);
    let record = session.submit(&client).context("submitting errors")?;
    println!("Kp error  = {:.6}", record.kp_error);
    println!("Ki error  = {:.6}", record.ki_error);
    println!("Kd error  = {:.6}", record.kd_error);
    println!("Avg error = {:.6}", record.avg_error);
    Ok(())
}

fn grade(config: &AppConfig, out: &Path) -> anyhow::Result<()> {
    let client = ScoringClient::new(config.http_store()?);
    let grades = client
        .export_grades(out)
        .with_context(|| format!("exporting grades to {}", out.display()))?;
    println!("{} grades written to {}", grades.len(), out.display());
    Ok(())
}

fn print_session(session: &Session) {
    let (num, den) = session.plant_description();
    let target = session.model().target();
    println!("identifier     = {}", session.identifier());
    println!("numerator      = {num}");
    println!("denominator    = {den}");
    println!("overshoot      = {}%", target.overshoot_percent);
    println!("settling time  = {} s", target.settling_time);
    match session.true_design() {
        Ok(design) if design.mirrored => {
            println!("note           = compensator zero mirrored into the left half-plane")
        }
        Ok(_) => {}
        Err(err) => println!("note           = {err}"),
    }
}
