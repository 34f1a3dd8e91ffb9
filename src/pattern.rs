//////////////////////////////////////////////////////////////////////
// tiling files: one keyword per line, # starts a comment
//
//   symbol 2 3 6
//   distances 1.2 1.0 0.8
//   extent 30
//   depth 50
//   face_colors 477984 EEAA4D C03C44
//
// see TilingFile::parse_keyword for the full list.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::coxeter::{INFINITE_ORDER, RANK};
use crate::errors::*;
use crate::render::RenderSettings;
use crate::tiling::TilingSpec;

//////////////////////////////////////////////////////////////////////
// everything needed to render one tiling to one file

#[derive(Debug, Clone, PartialEq)]
pub struct TilingJob {
    pub spec: TilingSpec,
    pub settings: RenderSettings,
    pub output: PathBuf,
}

//////////////////////////////////////////////////////////////////////
// token parsers

// dihedral order: positive integer or "inf"
pub fn parse_order(token: &str) -> Result<u32> {

    match token {
        "inf" | "infinity" | "oo" => Ok(INFINITE_ORDER),
        _ => token.parse::<u32>().chain_err(|| format!("invalid order: {:}", token)),
    }

}

// 24-bit color as RRGGBB, optionally prefixed by 0x
pub fn parse_color(token: &str) -> Result<u32> {

    let digits = token.strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);

    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("color {:} should have 6 hex digits", token);
    }

    let value = u32::from_str_radix(digits, 16)
        .chain_err(|| format!("invalid color: {:}", token))?;

    Ok(value)

}

fn parse_all<T>(tokens: &[&str], f: impl Fn(&str) -> Result<T>) -> Result<Vec<T>> {

    let mut rval = Vec::new();

    for &value in tokens {
        rval.push(f(value)?);
    }

    Ok(rval)
}

//////////////////////////////////////////////////////////////////////
// macro for pulling a fixed list of typed tokens off a line

macro_rules! parse_tokens {

    // finalizer - no more input to match, just error if remaining
    // input or return collected outputs
    ($it:ident { } -> { $($tuple:ident,)* } ) => (
        match $it.next() {
            Some(value) => Err(Error::from(format!("found extra token(s) starting with \"{:}\"", value))),
            None => Ok(($($tuple),*))
        }
    );

    // name, parser function pair
    ($it:ident { $name:ident with $func:expr, $($ts:tt)* } -> { $($tuple:ident,)* } ) => (
        match $it.next() {
            None => Err(Error::from(format!("missing token for {:}", stringify!($name)))),
            Some(value) => match $func(value) {
                Ok($name) => parse_tokens!( $it { $($ts)* } -> { $($tuple,)* $name, } ),
                Err(e) => Err(e)
            }
        }
    );

    // name, type pair
    ($it:ident { $name:ident : $type:ident, $($ts:tt)* } -> { $($tuple:ident,)* } ) => (
        match $it.next() {
            None => Err(Error::from(format!("missing token for {:}", stringify!($name)))),
            Some(value) => if let Ok($name) = value.parse::<$type>() {
                parse_tokens!( $it { $($ts)* } -> { $($tuple,)* $name, } )
            } else {
                Err(Error::from(format!("error parsing {:} as type {:}",
                                        value, stringify!($type))))
            }
        }
    );

    // Entry point
    ($a:expr, { $($ts:tt)+ }) => (
        {
            let mut it = $a.iter().copied();
            parse_tokens!( it { $($ts)* , } -> { } )
        }
    );

}

//////////////////////////////////////////////////////////////////////
// macros for merging/validating individual fields of TilingFile

macro_rules! copy_field {

    ($dst:ident, $src:ident, $field:ident) => (
        if $src.$field.is_some() {
            if $dst.$field.is_some() {
                bail!("{:} is already set", stringify!($field));
            }
            $dst.$field = $src.$field;
        }
    )

}

macro_rules! ensure_field {

    ($tf:ident, $fvec:ident, $field:ident) => (
        if $tf.$field.is_none() {
            $fvec.push(stringify!($field));
        }
    )

}

//////////////////////////////////////////////////////////////////////
// partially specified tiling file; every keyword sets one field

#[derive(Debug, Default)]
struct TilingFile {
    symbol: Option<(u32, u32, u32)>,
    distances: Option<[f64; RANK]>,
    output: Option<String>,
    size: Option<(i32, i32)>,
    extent: Option<f64>,
    depth: Option<usize>,
    line_width: Option<f64>,
    margin: Option<f64>,
    edge_color: Option<u32>,
    face_colors: Option<Option<Vec<u32>>>,
    background: Option<u32>,
}

// output path relative to the tiling file's directory
fn rel_path(orig_filename: &str, child_filename: &str) -> PathBuf {

    match Path::new(orig_filename).parent() {
        None => PathBuf::from(child_filename),
        Some(parent) => parent.join(child_filename),
    }

}

impl TilingFile {

    fn update(&mut self, other: TilingFile) -> Result<()> {

        copy_field!(self, other, symbol);
        copy_field!(self, other, distances);
        copy_field!(self, other, output);
        copy_field!(self, other, size);
        copy_field!(self, other, extent);
        copy_field!(self, other, depth);
        copy_field!(self, other, line_width);
        copy_field!(self, other, margin);
        copy_field!(self, other, edge_color);
        copy_field!(self, other, face_colors);
        copy_field!(self, other, background);

        Ok(())

    }

    fn parse_keyword(keyword: &str, rest: &[&str]) -> Result<TilingFile> {

        let mut update = TilingFile::default();

        match keyword {

            "symbol" => {

                let (p, q, r) = parse_tokens!(rest, {
                    p with parse_order,
                    q with parse_order,
                    r with parse_order
                })?;

                update.symbol = Some((p, q, r));

            }

            "distances" => {

                let (d0, d1, d2) = parse_tokens!(rest, { d0: f64, d1: f64, d2: f64 })?;

                update.distances = Some([d0, d1, d2]);

            }

            "output" => {

                let output = parse_tokens!(rest, { filename: String })?;

                update.output = Some(output);

            }

            "size" => {

                let (w, h) = parse_tokens!(rest, { width: i32, height: i32 })?;

                update.size = Some((w, h));

            }

            "extent" => {
                update.extent = Some(parse_tokens!(rest, { extent: f64 })?);
            }

            "depth" => {
                update.depth = Some(parse_tokens!(rest, { depth: usize })?);
            }

            "line_width" => {
                update.line_width = Some(parse_tokens!(rest, { length: f64 })?);
            }

            "margin" => {
                update.margin = Some(parse_tokens!(rest, { length: f64 })?);
            }

            "edge_color" => {
                update.edge_color = Some(parse_tokens!(rest, { color with parse_color })?);
            }

            "background" => {
                update.background = Some(parse_tokens!(rest, { color with parse_color })?);
            }

            "face_colors" => {

                if rest == ["none"] {
                    update.face_colors = Some(None);
                } else if rest.is_empty() {
                    bail!("need at least one color or \"none\"");
                } else {
                    update.face_colors = Some(Some(parse_all(rest, parse_color)?));
                }

            }

            _ => {
                bail!("unrecognized keyword");
            }

        };

        Ok(update)

    }

    fn update_from(&mut self, line: &str) -> Result<()> {

        let mut trimmed = line.trim();

        if let Some(pos) = trimmed.find('#') {
            trimmed = &trimmed[0..pos];
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();

        if tokens.is_empty() {
            return Ok(());
        }

        let keyword = tokens[0];
        let rest = &tokens[1..];

        let update = Self::parse_keyword(keyword, rest).chain_err(
            || format!("while parsing keyword {:}", keyword))?;

        self.update(update)

    }

    fn into_job(self, filename: &str) -> Result<TilingJob> {

        let mut unset_fields = Vec::new();

        ensure_field!(self, unset_fields, symbol);
        ensure_field!(self, unset_fields, distances);
        ensure_field!(self, unset_fields, extent);
        ensure_field!(self, unset_fields, depth);

        if !unset_fields.is_empty() {
            bail!("{:}: the following field(s) were unset: {:}",
                  filename, unset_fields.as_slice().join(", "));
        }

        let (p, q, r) = self.symbol.unwrap_or_default();
        let spec = TilingSpec::from_symbol((p, q, r), self.distances.unwrap_or_default())?;

        let defaults = RenderSettings::default();
        let (width, height) = self.size.unwrap_or((defaults.width, defaults.height));

        let settings = RenderSettings {
            width,
            height,
            extent: self.extent.unwrap_or(defaults.extent),
            depth: self.depth.unwrap_or(defaults.depth),
            line_width: self.line_width.unwrap_or(defaults.line_width),
            margin: self.margin.unwrap_or(defaults.margin),
            edge_color: self.edge_color.unwrap_or(defaults.edge_color),
            face_colors: self.face_colors.unwrap_or(defaults.face_colors),
            background: self.background.unwrap_or(defaults.background),
        };

        settings.validate()?;

        let output = match self.output {
            Some(output) => rel_path(filename, &output),
            None => {
                let stem = Path::new(filename).file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("output");
                rel_path(filename, &format!("{:}.png", stem))
            }
        };

        Ok(TilingJob { spec, settings, output })

    }

}

//////////////////////////////////////////////////////////////////////

pub fn parse(filename: &str, istr: &mut impl BufRead) -> Result<TilingJob> {

    let mut tf = TilingFile::default();
    let mut lineno = 0;

    loop {

        let mut line = String::new();

        lineno += 1;

        let len = istr.read_line(&mut line).chain_err(|| format!("{:}:{:}: read error", filename, lineno))?;

        if len == 0 {
            break;
        }

        tf.update_from(line.as_str()).chain_err(|| format!("{:}:{:}: parse error", filename, lineno))?;

    }

    tf.into_job(filename)

}

pub fn parse_file(filename: &str) -> Result<TilingJob> {

    let f = std::fs::File::open(filename).chain_err(|| format!("opening {:}", filename))?;
    let mut reader = std::io::BufReader::new(f);

    parse(filename, &mut reader)

}

//////////////////////////////////////////////////////////////////////
