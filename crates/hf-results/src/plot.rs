//! Gnuplot-ready output: one `<time_index>.dat` file per recorded row and a
//! `plot.gp` script that overlays them.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use hf_sim::{Observer, ObserverResult, Parameters, RowView};

use crate::params_text::format_parameters;
use crate::{ResultsError, ResultsResult};

pub const DEFAULT_WRITE_EVERY: usize = 10;
pub const DEFAULT_PLOT_EVERY: usize = 10;
pub const SCRIPT_NAME: &str = "plot.gp";

const REAL_DIGITS: usize = 21;
const LEGEND_DIGITS: usize = 6;

/// Shortest of fixed or exponent notation with six significant digits and
/// trailing zeros removed, as gnuplot legends conventionally show time.
pub fn format_general(value: f64) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "nan".to_string()
        } else if value > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let sci = format!("{value:.p$e}", p = LEGEND_DIGITS - 1);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..LEGEND_DIGITS as i32).contains(&exponent) {
        let decimals = (LEGEND_DIGITS as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exponent.abs())
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// Script plotting `0.dat`, `<every>.dat`, ... up to `last_time_index`.
pub fn gnuplot_script(last_time_index: usize, every: usize) -> String {
    format!(
        "set terminal wxt persist\n\
         set xlabel 'Space (x)'\n\
         set ylabel 'Temperature (u(x))'\n\
         #set offsets graph 0.01, 0.01, 0.01, 0.01\n\
         set grid xtics ytics\n\
         set style fill transparent solid 0.333\n\
         filename(x) = sprintf(\"%d.dat\", x)\n\
         set key autotitle columnhead\n\
         plot for [i = 0:{last_time_index}:{every}] filename(i) using 1:2 with lines\n"
    )
}

/// Observer writing `.dat` row files into a directory.
#[derive(Debug, Clone)]
pub struct PlotWriter {
    dir: PathBuf,
    write_every: usize,
    plot_every: usize,
    write_script: bool,
    files: Vec<PathBuf>,
}

impl PlotWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_every: DEFAULT_WRITE_EVERY,
            plot_every: DEFAULT_PLOT_EVERY,
            write_script: true,
            files: Vec::new(),
        }
    }

    /// Write rows whose time index is a multiple of `n` (0 is treated as 1).
    pub fn write_every(mut self, n: usize) -> Self {
        self.write_every = n.max(1);
        self
    }

    /// Stride of the `plot for` loop in the script (0 is treated as 1).
    pub fn plot_every(mut self, n: usize) -> Self {
        self.plot_every = n.max(1);
        self
    }

    pub fn with_script(mut self, enabled: bool) -> Self {
        self.write_script = enabled;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Every file created so far, script first when enabled.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn row_path(&self, time_index: usize) -> PathBuf {
        self.dir.join(format!("{time_index}.dat"))
    }

    fn prepare(&mut self, params: &Parameters) -> ResultsResult<()> {
        fs::create_dir_all(&self.dir)?;
        if self.write_script {
            let path = self.dir.join(SCRIPT_NAME);
            let script = gnuplot_script(params.time_points.saturating_sub(1), self.plot_every);
            fs::write(&path, script).map_err(|source| ResultsError::FileWrite {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), "wrote gnuplot script");
            self.files.push(path);
        }
        Ok(())
    }

    fn write_row(&mut self, params: &Parameters, row: RowView<'_>, time_index: usize) -> ResultsResult<()> {
        let path = self.row_path(time_index);
        write_row_file(&path, params, row.values(), time_index).map_err(|source| {
            ResultsError::FileWrite {
                path: path.clone(),
                source,
            }
        })?;
        self.files.push(path);
        Ok(())
    }
}

fn write_row_file(
    path: &Path,
    params: &Parameters,
    values: &[f64],
    time_index: usize,
) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    let time = params.time_coordinate(time_index);

    writeln!(out, "x \"u(x, {})\"", format_general(time))?;
    writeln!(out, "# {};", format_parameters(params))?;
    writeln!(out, "# time={time:.6};time_point={time_index};")?;
    writeln!(out, "# space;temperature;")?;
    for (space_index, temperature) in values.iter().enumerate() {
        let space = params.space_coordinate(space_index);
        writeln!(out, "{space:.p$} {temperature:.p$}", p = REAL_DIGITS)?;
    }
    out.flush()
}

impl Observer for PlotWriter {
    fn before_solve(&mut self, params: &Parameters) -> ObserverResult {
        self.prepare(params)?;
        Ok(())
    }

    fn on_row(&mut self, params: &Parameters, row: RowView<'_>, time_index: usize) -> ObserverResult {
        if time_index % self.write_every == 0 {
            self.write_row(params, row, time_index)?;
        }
        Ok(())
    }
}
