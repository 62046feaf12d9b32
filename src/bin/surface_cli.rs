#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("surface_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use bezier_board::geom::{AnimatedSurface, SurfaceConfig, TessellationBuffer};
    use std::fmt::Write as _;
    use std::fs::{self, File};
    use std::io::{BufWriter, Write};
    use std::path::{Path, PathBuf};

    const SNAPSHOT_QUANTIZE: f64 = 1e-6;
    const SNAPSHOT_DECIMALS: usize = 6;

    const USAGE: &str = r"surface_cli (bezier-board)

USAGE:
  surface_cli run [options]
  surface_cli help

OPTIONS (run):
  --precision <n>    Grid cells per side (default 50)
  --degree <n>       Control net size D (default 4)
  --ticks <n>        Animation ticks to run (default 0)
  --dt <f>           Interval passed to every tick (default 1.0)
  --raise <r> <c> <h>
                     Set interior control point (r, c) to height h before animating
  --obj <path>       Write the tessellated surface as OBJ
  --snap <path>      Write the snapshot to a file instead of stdout
  --overwrite        Overwrite existing output files
  -h, --help         Show this help
";

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "run" => cmd_run(&mut args),
            "-h" | "--help" | "help" => {
                print_usage();
                Ok(())
            }
            other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
        }
    }

    fn print_usage() {
        println!("{USAGE}");
    }

    struct RunOptions {
        config: SurfaceConfig,
        ticks: u64,
        dt: f64,
        raises: Vec<(usize, usize, f64)>,
        obj_path: Option<PathBuf>,
        snap_path: Option<PathBuf>,
        overwrite: bool,
    }

    fn parse_run_options(args: &mut Args) -> Result<Option<RunOptions>, String> {
        let mut options = RunOptions {
            config: SurfaceConfig::default(),
            ticks: 0,
            dt: 1.0,
            raises: Vec::new(),
            obj_path: None,
            snap_path: None,
            overwrite: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--precision" => {
                    options.config.precision = args.parsed("--precision")?;
                }
                "--degree" => options.config.degree = args.parsed("--degree")?,
                "--ticks" => options.ticks = args.parsed("--ticks")?,
                "--dt" => options.dt = args.parsed("--dt")?,
                "--raise" => {
                    let row = args.parsed("--raise")?;
                    let column = args.parsed("--raise")?;
                    let height = args.parsed("--raise")?;
                    options.raises.push((row, column, height));
                }
                "--obj" => options.obj_path = Some(PathBuf::from(args.value("--obj")?)),
                "--snap" => options.snap_path = Some(PathBuf::from(args.value("--snap")?)),
                "--overwrite" => options.overwrite = true,
                "-h" | "--help" => {
                    print_usage();
                    return Ok(None);
                }
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }

        if !options.dt.is_finite() {
            return Err("--dt must be finite".to_string());
        }
        Ok(Some(options))
    }

    fn cmd_run(args: &mut Args) -> Result<(), String> {
        let Some(options) = parse_run_options(args)? else {
            return Ok(());
        };

        let mut surface =
            AnimatedSurface::new(options.config).map_err(|e| format!("build surface: {e}"))?;

        for &(row, column, height) in &options.raises {
            surface
                .set_control_point(row, column, height)
                .map_err(|e| format!("--raise {row} {column}: {e}"))?;
        }
        if !options.raises.is_empty() {
            surface.refresh();
        }

        for _ in 0..options.ticks {
            surface.tick(options.dt);
        }

        let buffer = surface.buffer();
        buffer
            .validate()
            .map_err(|e| format!("mesh validation failed: {e}"))?;

        eprintln!(
            "surface_cli: precision={} ticks={} vertices={} triangles={}",
            buffer.precision(),
            surface.elapsed_ticks(),
            buffer.vertex_count(),
            buffer.triangle_count()
        );
        if let Some(report) = surface.metrics() {
            eprintln!(
                "surface_cli: total={:.3}ms mean_refresh={:.3}ms",
                report.total_ms(),
                report.mean_refresh_ms()
            );
        }

        if let Some(path) = options.obj_path.as_ref() {
            write_obj_file(path, buffer, options.overwrite)?;
            eprintln!("wrote {}", path.display());
        }

        let text = snapshot(&surface)?;
        match options.snap_path.as_ref() {
            Some(path) => {
                write_text_file(path, &text, options.overwrite)?;
                eprintln!("wrote {}", path.display());
            }
            None => print!("{text}"),
        }
        Ok(())
    }

    fn snapshot(surface: &AnimatedSurface) -> Result<String, String> {
        let buffer = surface.buffer();
        let size = surface.board_size();
        let mut out = String::new();

        let _ = writeln!(out, "precision {}", buffer.precision());
        let _ = writeln!(out, "ticks {}", surface.elapsed_ticks());
        let _ = writeln!(out, "vertices {}", buffer.vertex_count());
        let _ = writeln!(out, "indices {}", buffer.indices().len());

        out.push_str("\nheights (row, column)\n");
        for row in 0..size {
            for column in 0..size {
                if column > 0 {
                    out.push(' ');
                }
                let height = surface
                    .height_at(row, column)
                    .map_err(|e| format!("height query: {e}"))?;
                write_f64(&mut out, f64::from(height));
            }
            out.push('\n');
        }

        out.push_str("\nnormals (x, y)\n");
        for (x, y) in [(0.0, 0.0), (0.25, 0.25), (0.5, 0.5), (0.75, 0.25), (1.0, 1.0)] {
            let n = surface.normal(x, y);
            let _ = write!(out, "{x:.2} {y:.2} :");
            for c in n.to_array() {
                out.push(' ');
                write_f64(&mut out, c);
            }
            out.push('\n');
        }
        Ok(out)
    }

    fn quantize_f64(value: f64) -> f64 {
        if !value.is_finite() {
            return value;
        }
        let q = (value / SNAPSHOT_QUANTIZE).round() * SNAPSHOT_QUANTIZE;
        // collapse -0.0
        if q == 0.0 { 0.0 } else { q }
    }

    fn write_f64(out: &mut String, value: f64) {
        let value = quantize_f64(value);
        let _ = write!(out, "{value:.SNAPSHOT_DECIMALS$}");
    }

    fn ensure_writable(path: &Path, overwrite: bool) -> Result<(), String> {
        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }
        Ok(())
    }

    fn write_text_file(path: &Path, text: &str, overwrite: bool) -> Result<(), String> {
        ensure_writable(path, overwrite)?;
        fs::write(path, text).map_err(|e| format!("write {}: {e}", path.display()))
    }

    fn write_obj_file(path: &Path, buffer: &TessellationBuffer, overwrite: bool) -> Result<(), String> {
        ensure_writable(path, overwrite)?;

        let file = File::create(path).map_err(|e| format!("create {}: {e}", path.display()))?;
        let mut w = BufWriter::new(file);
        let err = |e: std::io::Error| format!("write obj: {e}");

        writeln!(w, "# bezier-board surface_cli").map_err(err)?;
        writeln!(w, "o bezier_surface").map_err(err)?;

        for v in buffer.vertices() {
            let [x, y, z] = v.position;
            writeln!(w, "v {x} {y} {z}").map_err(err)?;
        }
        for v in buffer.vertices() {
            let [u, t] = v.uv;
            writeln!(w, "vt {u} {t}").map_err(err)?;
        }
        for v in buffer.vertices() {
            let [x, y, z] = v.normal;
            writeln!(w, "vn {x} {y} {z}").map_err(err)?;
        }

        for tri in buffer.indices().chunks_exact(3) {
            let a = tri[0] + 1;
            let b = tri[1] + 1;
            let c = tri[2] + 1;
            writeln!(w, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}").map_err(err)?;
        }

        w.flush().map_err(|e| format!("flush {}: {e}", path.display()))
    }

    struct Args {
        args: Vec<String>,
        pos: usize,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self { args, pos: 0 }
        }

        fn next(&mut self) -> Option<String> {
            let arg = self.args.get(self.pos)?.clone();
            self.pos += 1;
            Some(arg)
        }

        fn value(&mut self, flag: &str) -> Result<String, String> {
            self.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        }

        fn parsed<T: std::str::FromStr>(&mut self, flag: &str) -> Result<T, String> {
            let raw = self.value(flag)?;
            raw.parse()
                .map_err(|_| format!("invalid value `{raw}` for {flag}"))
        }
    }
}
