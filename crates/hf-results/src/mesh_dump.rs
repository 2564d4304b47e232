//! Text dump of the whole rolling grid, one block per time index.

use std::io::{self, Write};

use hf_sim::{Grid, Observer, ObserverResult, Parameters, RowView};

const DEFAULT_PRECISION: usize = 6;

/// `Mesh{points={v;v;...};space_points=N;time_points=W;}` with stored slots in order.
pub fn write_mesh<W: Write>(grid: &Grid, out: &mut W, precision: usize) -> io::Result<()> {
    write!(out, "Mesh{{points={{")?;
    for value in grid.points() {
        write!(out, "{value:.precision$};")?;
    }
    write!(
        out,
        "}};space_points={};time_points={};}}",
        grid.space_points(),
        grid.time_window()
    )
}

/// Observer printing the full grid after every row.
pub struct MeshDump<W: Write> {
    out: W,
    precision: usize,
}

impl MeshDump<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> MeshDump<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            precision: DEFAULT_PRECISION,
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Observer for MeshDump<W> {
    fn on_row(&mut self, _params: &Parameters, row: RowView<'_>, time_index: usize) -> ObserverResult {
        writeln!(self.out, "time_point={time_index};")?;
        write_mesh(row.grid(), &mut self.out, self.precision)?;
        writeln!(self.out, ";")?;
        self.out.flush()?;
        Ok(())
    }
}
