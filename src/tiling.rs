//////////////////////////////////////////////////////////////////////
// a Euclidean uniform tiling: Coxeter symbol + initial distances in,
// fundamental faces and their orbits out

use std::cell::OnceCell;
use std::collections::HashSet;

use crate::automaton::{ShortlexAutomaton, StateId};
use crate::coxeter::CoxeterMatrix;
use crate::errors::*;
use crate::faces::{self, Face};
use crate::reflect::{self, Reflection};
use crate::traverse::{traverse, TraversalRecord};
use crate::{mirrors, Matrix3d, Vec3d};

// position of a polygon's centroid on a 1e-6 grid
fn tile_key(shape: &[Vec3d]) -> (i64, i64) {

    let n = shape.len().max(1) as f64;

    let (x, y) = shape.iter().fold((0.0, 0.0), |(x, y), v| (x + v.x / v.z, y + v.y / v.z));

    ((x / n * 1e6).round() as i64, (y / n * 1e6).round() as i64)

}

//////////////////////////////////////////////////////////////////////
// input value object

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilingSpec {
    pub cox_mat: CoxeterMatrix,
    pub distances: [f64; 3],
}

impl TilingSpec {

    pub fn new(cox_mat: CoxeterMatrix, distances: [f64; 3]) -> Result<Self> {

        if !cox_mat.is_euclidean() {
            bail!(ErrorKind::Configuration(
                format!("{} is not a Euclidean triangle group (angle sum {} pi)",
                        cox_mat, cox_mat.angle_sum())));
        }

        if distances.iter().any(|d| !d.is_finite()) {
            bail!(ErrorKind::Configuration(
                format!("distances {:?} must be finite", distances)));
        }

        Ok(TilingSpec { cox_mat, distances })

    }

    pub fn from_symbol(pqr: (u32, u32, u32), distances: [f64; 3]) -> Result<Self> {
        Self::new(CoxeterMatrix::from_symbol(pqr.0, pqr.1, pqr.2)?, distances)
    }

    // a mirror bounds the chamber iff the initial point is off it
    pub fn active(&self) -> [bool; 3] {
        [self.distances[0] != 0.0,
         self.distances[1] != 0.0,
         self.distances[2] != 0.0]
    }

}

//////////////////////////////////////////////////////////////////////
// everything derived once from a TilingSpec

#[derive(Debug, Clone)]
pub struct GeometryContext {
    pub mirrors: Matrix3d,
    pub reflections: [Reflection; 3],
    pub init_point: Vec3d,
}

impl GeometryContext {

    pub fn new(spec: &TilingSpec) -> Result<Self> {

        let mirrors = mirrors::solve(&spec.cox_mat)?;
        let reflections = reflect::build(&mirrors, &spec.distances);
        let init_point = reflect::solve_initial_point(&mirrors, &spec.distances)?;

        Ok(GeometryContext { mirrors, reflections, init_point })

    }

}

//////////////////////////////////////////////////////////////////////

#[derive(Debug)]
pub struct EuclideanTiling {
    spec: TilingSpec,
    geometry: GeometryContext,
    automaton: ShortlexAutomaton,
    faces: OnceCell<Vec<Face>>,
}

impl EuclideanTiling {

    pub fn new(spec: TilingSpec) -> Result<Self> {

        let geometry = GeometryContext::new(&spec)?;
        let automaton = ShortlexAutomaton::new(&spec.cox_mat)?;

        Ok(EuclideanTiling {
            spec,
            geometry,
            automaton,
            faces: OnceCell::new(),
        })

    }

    pub fn spec(&self) -> &TilingSpec {
        &self.spec
    }

    pub fn geometry(&self) -> &GeometryContext {
        &self.geometry
    }

    pub fn automaton(&self) -> &ShortlexAutomaton {
        &self.automaton
    }

    // fundamental faces, built on first use
    pub fn faces(&self) -> Result<&[Face]> {

        if let Some(faces) = self.faces.get() {
            return Ok(faces);
        }

        let faces = faces::build_faces(&self.geometry.init_point,
                                       &self.geometry.reflections,
                                       &self.spec.cox_mat,
                                       &self.spec.active())?;

        info!("{} {:?}: {} fundamental face(s)",
              self.spec.cox_mat, self.spec.distances, faces.len());

        Ok(self.faces.get_or_init(|| faces))

    }

    // orbit of a single face out to the given word length
    pub fn face_orbit(&self, face: &Face, depth: usize)
                      -> impl Iterator<Item = TraversalRecord<StateId>> + '_ {
        traverse(&self.automaton, &self.geometry.reflections, depth, face.points.clone())
    }

    // every tile of every face, tagged with the face index.
    //
    // words differing by an element of the face's stabilizer put the
    // same polygon in the same place; only the first one is kept.
    pub fn tiles(&self, depth: usize)
                 -> Result<impl Iterator<Item = (usize, TraversalRecord<StateId>)> + '_> {

        let faces = self.faces()?;
        let mut seen = HashSet::new();

        Ok(faces.iter().enumerate()
           .flat_map(move |(idx, face)| {
               self.face_orbit(face, depth).map(move |record| (idx, record))
           })
           .filter(move |(idx, record)| seen.insert((*idx, tile_key(&record.shape)))))

    }

}

//////////////////////////////////////////////////////////////////////
