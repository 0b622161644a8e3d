// main.rs
//
// Console bench for the transform kernel. Each suite runs a handful of named
// cases against known values and reports OK / KO per case, then a global
// count. Exits with status 1 when any suite fails.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use trskit::float_types::{PI, Real};
use trskit::{KernelError, Matrix3x3, Matrix4x4, Quat, Vec3, vec3};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELL: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

const TOL: Real = 1e-4;
const ROUND_TRIP_TOL: Real = 1e-3;
const ROUND_TRIPS: usize = 20;

fn nearly(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() <= eps
}

fn vec_eq(a: Vec3, b: Vec3, eps: Real) -> bool {
    (0..3).all(|i| nearly(a[i], b[i], eps))
}

fn mat3_eq(a: &Matrix3x3, b: &Matrix3x3, eps: Real) -> bool {
    (0..3).all(|i| (0..3).all(|j| nearly(a.at(i, j), b.at(i, j), eps)))
}

fn mat4_eq(a: &Matrix4x4, b: &Matrix4x4, eps: Real) -> bool {
    (0..4).all(|i| (0..4).all(|j| nearly(a.at(i, j), b.at(i, j), eps)))
}

fn rand_unit(rng: &mut ChaCha8Rng) -> Vec3 {
    let v = vec3(
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
    );
    v.try_normalize(1e-9).unwrap_or(Vec3::x())
}

fn rand_vec(rng: &mut ChaCha8Rng) -> Vec3 {
    vec3(
        rng.gen_range(-10.0..10.0),
        rng.gen_range(-10.0..10.0),
        rng.gen_range(-10.0..10.0),
    )
}

struct Case {
    ok: bool,
    name: &'static str,
    detail: String,
}

struct Suite {
    title: &'static str,
    cases: Vec<Case>,
}

impl Suite {
    fn new(title: &'static str) -> Self {
        Suite {
            title,
            cases: Vec::new(),
        }
    }

    fn add(&mut self, ok: bool, name: &'static str, detail: impl Into<String>) {
        self.cases.push(Case {
            ok,
            name,
            detail: detail.into(),
        });
    }

    /// Records a fallible case: a kernel error counts as a failure and its
    /// message becomes the detail.
    fn add_result(&mut self, name: &'static str, detail: &str, result: Result<bool, KernelError>) {
        match result {
            Ok(ok) => self.add(ok, name, detail),
            Err(err) => self.add(false, name, err.to_string()),
        }
    }

    fn passed(&self) -> usize {
        self.cases.iter().filter(|c| c.ok).count()
    }

    fn print(&self) -> bool {
        println!("{CYAN}\n== {} =={RESET}", self.title);
        for case in &self.cases {
            let (color, tag) = if case.ok { (GREEN, "OK") } else { (RED, "KO") };
            print!("{color}{tag}{RESET}  {}", case.name);
            if !case.detail.is_empty() {
                let detail_color = if case.ok { CYAN } else { YELL };
                print!("  {detail_color}{}{RESET}", case.detail);
            }
            println!();
        }
        let (passed, total) = (self.passed(), self.cases.len());
        let color = if passed == total {
            GREEN
        } else if passed > 0 {
            YELL
        } else {
            RED
        };
        println!("{BOLD}{color}-- {passed}/{total} subtests{RESET}");
        passed == total
    }
}

fn basic_is_affine(s: &mut Suite) {
    s.add(Matrix4x4::identity().is_affine(), "Identity.is_affine()", "must be true");

    let mut t = Matrix4x4::identity();
    t.set(0, 3, 10.0);
    s.add(t.is_affine(), "Translation.is_affine()", "bottom row [0 0 0 1]");

    let mut p = Matrix4x4::identity();
    p.set(3, 2, -1.0);
    p.set(3, 3, 0.0);
    s.add(!p.is_affine(), "Projection.is_affine()", "modified bottom row -> false");
}

fn basic_point_vs_vector(s: &mut Suite) {
    let m = Matrix4x4::translate(vec3(5.0, -2.0, 3.0));
    s.add(
        vec_eq(m.transform_point(vec3(1.0, 1.0, 1.0)), vec3(6.0, -1.0, 4.0), TOL),
        "transform_point (translation)",
        "p + t",
    );
    let v = vec3(1.0, 0.0, 0.0);
    s.add(
        vec_eq(m.transform_vector(v), v, TOL),
        "transform_vector (translation)",
        "invariant",
    );
    let ms = Matrix4x4::scale(vec3(2.0, 2.0, 2.0));
    s.add(
        vec_eq(ms.transform_point(vec3(1.0, 1.0, 1.0)), vec3(2.0, 2.0, 2.0), TOL),
        "transform_point (scale)",
        "x2",
    );
}

fn basic_constructors(s: &mut Suite) {
    s.add_result(
        "rotate(Matrix3x3)",
        "Z-90",
        Matrix3x3::rotation_axis_angle(Vec3::z(), PI / 2.0).map(|rz| {
            vec_eq(
                Matrix4x4::rotate(rz).transform_point(Vec3::x()),
                Vec3::y(),
                TOL,
            )
        }),
    );

    let trs = Matrix4x4::from_trs(vec3(10.0, 0.0, 0.0), Matrix3x3::identity(), vec3(2.0, 2.0, 2.0));
    s.add(
        vec_eq(trs.transform_point(Vec3::x()), vec3(12.0, 0.0, 0.0), TOL),
        "from_trs",
        "T * R * S",
    );

    s.add_result(
        "rotate(Quat)",
        "Y-90",
        Quat::from_axis_angle(Vec3::y(), PI / 2.0).map(|q| {
            vec_eq(
                Matrix4x4::rotate(q).transform_point(Vec3::z()),
                Vec3::x(),
                TOL,
            )
        }),
    );
}

fn inverses(s: &mut Suite) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let identity = Matrix4x4::identity();

    let tr = (0..ROUND_TRIPS).try_fold(true, |all, _| -> Result<bool, KernelError> {
        let t = rand_vec(&mut rng);
        let r = Matrix3x3::rotation_axis_angle(rand_unit(&mut rng), 1.0)?;
        let m = Matrix4x4::from_trs(t, r, Vec3::repeat(1.0));
        Ok(all && mat4_eq(&m.multiply(&m.inverse_tr()?), &identity, ROUND_TRIP_TOL))
    });
    s.add_result("inverse_tr() round trip", "M * M_inv == Identity", tr);

    let trs = (0..ROUND_TRIPS).try_fold(true, |all, _| -> Result<bool, KernelError> {
        let t = rand_vec(&mut rng);
        let r = Matrix3x3::rotation_axis_angle(rand_unit(&mut rng), 1.0)?;
        let m = Matrix4x4::from_trs(t, r, vec3(2.0, 0.5, 3.0));
        Ok(all && mat4_eq(&m.multiply(&m.inverse_trs()?), &identity, ROUND_TRIP_TOL))
    });
    s.add_result("inverse_trs() round trip", "non-uniform scale", trs);

    let flat = Matrix4x4::scale(vec3(1.0, 0.0, 1.0));
    s.add(
        flat.inverse_trs().is_err(),
        "inverse_trs() on zero scale",
        "DegenerateScale",
    );
}

fn decomposition(s: &mut Suite) {
    let t_in = vec3(10.5, -3.2, 4.1);
    let s_in = vec3(2.0, 0.5, 3.0);
    let r_in = match Matrix3x3::rotation_axis_angle(Vec3::y(), 0.5) {
        Ok(r) => r,
        Err(err) => {
            s.add(false, "rotation_axis_angle", err.to_string());
            return;
        }
    };
    let m = Matrix4x4::from_trs(t_in, r_in, s_in);

    s.add(vec_eq(m.get_translation(), t_in, TOL), "get_translation", "reads column 3");
    s.add(vec_eq(m.get_scale(), s_in, TOL), "get_scale", "column norms");
    s.add(mat3_eq(&m.get_rotation(), &r_in, TOL), "get_rotation", "normalized columns");
    s.add(
        mat3_eq(&m.get_rotation_scale(), &r_in.scale_columns(s_in), TOL),
        "get_rotation_scale",
        "R * diag(s)",
    );
    s.add(
        mat3_eq(&m.get_rotation_quat().to_matrix3x3(), &r_in, TOL),
        "get_rotation_quat",
        "same rotation",
    );
}

fn mutators(s: &mut Suite) {
    let r = Matrix3x3::from_euler_zyx(0.3, -0.4, 1.1);
    let mut m = Matrix4x4::from_trs(vec3(1.0, 2.0, 3.0), r, vec3(2.0, 3.0, 4.0));

    m.set_translation(vec3(-1.0, 0.0, 5.0));
    s.add(
        vec_eq(m.get_translation(), vec3(-1.0, 0.0, 5.0), TOL) && vec_eq(m.get_scale(), vec3(2.0, 3.0, 4.0), TOL),
        "set_translation",
        "block untouched",
    );

    m.set_scale(vec3(0.5, 0.5, 0.5));
    s.add(
        vec_eq(m.get_scale(), vec3(0.5, 0.5, 0.5), TOL) && mat3_eq(&m.get_rotation(), &r, TOL),
        "set_scale",
        "rotation kept",
    );

    let q = Quat::from_euler_zyx(-1.0, 0.2, 0.7);
    m.set_rotation(q);
    s.add(
        vec_eq(m.get_scale(), vec3(0.5, 0.5, 0.5), TOL) && mat3_eq(&m.get_rotation(), &q.to_matrix3x3(), TOL),
        "set_rotation(Quat)",
        "scale kept",
    );
}

fn quaternions(s: &mut Suite) {
    let (yaw, pitch, roll) = (0.8, -0.3, 2.1);
    s.add(
        mat3_eq(
            &Quat::from_euler_zyx(yaw, pitch, roll).to_matrix3x3(),
            &Matrix3x3::from_euler_zyx(yaw, pitch, roll),
            TOL,
        ),
        "from_euler_zyx",
        "quat == matrix",
    );

    s.add_result(
        "to_quat near 180 deg",
        "stable branch",
        Matrix3x3::rotation_axis_angle(vec3(1.0, 1.0, 0.0), PI - 1e-7)
            .map(|r| mat3_eq(&r.to_quat().to_matrix3x3(), &r, TOL)),
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("{BOLD}{CYAN}Transform kernel bench{RESET}");

    let mut suites = Vec::new();

    let mut s = Suite::new("[1] Basic transforms");
    basic_is_affine(&mut s);
    basic_constructors(&mut s);
    basic_point_vs_vector(&mut s);
    suites.push(s);

    let mut s = Suite::new("[2] Inverses (TR / TRS)");
    inverses(&mut s);
    suites.push(s);

    let mut s = Suite::new("[3] Decomposition");
    decomposition(&mut s);
    suites.push(s);

    let mut s = Suite::new("[4] Mutators");
    mutators(&mut s);
    suites.push(s);

    let mut s = Suite::new("[5] Quaternions");
    quaternions(&mut s);
    suites.push(s);

    let suites_ok = suites.iter().filter(|s| s.print()).count();
    let total = suites.len();
    let color = if suites_ok == total { GREEN } else { RED };
    println!("\n{color}Global result: {suites_ok}/{total} suites OK{RESET}");
    log::info!("{suites_ok}/{total} suites passed");

    if suites_ok != total {
        std::process::exit(1);
    }
}
