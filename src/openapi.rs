use utoipa::OpenApi;

use crate::domain::Identity;
use crate::domain::etudiant::{Etudiant, EtudiantCreate, EtudiantPatch, EtudiantReplace};
use crate::domain::filiere::{Filiere, FiliereCreate, FilierePatch, FiliereReplace};
use crate::domain::niveau::{Niveau, NiveauCreate, NiveauPatch, NiveauReplace};
use crate::domain::pays::{Pays, PaysCreate, PaysPatch, PaysReplace};

/// Aggregated API reference, served at `/docs`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "etudiant-etranger",
        description = "CRUD API over foreign students, their degree track, academic level and country of origin"
    ),
    components(schemas(
        Identity,
        Pays,
        PaysCreate,
        PaysReplace,
        PaysPatch,
        Niveau,
        NiveauCreate,
        NiveauReplace,
        NiveauPatch,
        Filiere,
        FiliereCreate,
        FiliereReplace,
        FilierePatch,
        Etudiant,
        EtudiantCreate,
        EtudiantReplace,
        EtudiantPatch,
    ))
)]
pub struct ApiDoc;
