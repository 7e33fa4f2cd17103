//! Field-schema descriptors for the record tables.

/// How a column's cell is rendered and exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    /// Cell holds an image URL; rendered as a thumbnail, exported as the raw
    /// URL, with a placeholder when empty.
    Photo,
}

/// One column of a record table.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    /// Human-readable header, shown in the table and the export.
    pub header: &'static str,
    /// Source field in the stored document.
    pub field: &'static str,
    /// Element index for list-valued photo fields; scalar photo fields only
    /// satisfy index 0.
    pub photo_index: usize,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    const fn text(header: &'static str, field: &'static str) -> Self {
        Self {
            header,
            field,
            photo_index: 0,
            kind: ColumnKind::Text,
        }
    }

    const fn photo(header: &'static str, field: &'static str, photo_index: usize) -> Self {
        Self {
            header,
            field,
            photo_index,
            kind: ColumnKind::Photo,
        }
    }
}

/// Complete description of one record type.
#[derive(Debug)]
pub struct RecordSchema {
    /// Store collection holding the documents.
    pub collection: &'static str,
    /// Tab label and page title.
    pub title: &'static str,
    /// Heading above the table.
    pub heading: &'static str,
    /// Path segment under `/dashboard`.
    pub slug: &'static str,
    pub search_placeholder: &'static str,
    pub export_filename: &'static str,
    pub sheet_name: &'static str,
    /// Field matched by the date-prefix filter.
    pub date_field: &'static str,
    /// Fields matched by the free-text filter.
    pub search_fields: &'static [&'static str],
    pub columns: &'static [ColumnSpec],
}

impl RecordSchema {
    /// Position of the first column backed by `field`.
    pub fn column_index(&self, field: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.field == field)
    }
}

pub const VALES: RecordSchema = RecordSchema {
    collection: "vales",
    title: "Vales",
    heading: "Vales Registrados",
    slug: "vales",
    search_placeholder: "Buscar por municipio, marca o placas",
    export_filename: "vales.xlsx",
    sheet_name: "Vales",
    date_field: "fecha",
    search_fields: &["municipio", "marca", "placas"],
    columns: &[
        ColumnSpec::text("Fecha", "fecha"),
        ColumnSpec::text("Seguro", "seguro"),
        ColumnSpec::text("Municipio", "municipio"),
        ColumnSpec::text("Marca", "marca"),
        ColumnSpec::text("Placas", "placas"),
        ColumnSpec::photo("Foto 1", "fotos", 0),
        ColumnSpec::photo("Foto 2", "fotos", 1),
    ],
};

pub const CORRALON: RecordSchema = RecordSchema {
    collection: "corralon",
    title: "Corralón",
    heading: "Corralón Registrado",
    slug: "corralon",
    search_placeholder: "Buscar por municipio, marca o placas",
    export_filename: "corralon.xlsx",
    sheet_name: "Corralón",
    date_field: "fecha",
    search_fields: &["municipio", "marca", "placas"],
    columns: &[
        ColumnSpec::text("Fecha", "fecha"),
        ColumnSpec::text("Municipio", "municipio"),
        ColumnSpec::text("Marca", "marca"),
        ColumnSpec::text("Submarca", "submarca"),
        ColumnSpec::text("Placas", "placas"),
        ColumnSpec::photo("Foto", "foto", 0),
    ],
};

pub const ENTREGAS: RecordSchema = RecordSchema {
    collection: "entregas",
    title: "Entregas",
    heading: "Entregas Registradas",
    slug: "entregas",
    search_placeholder: "Buscar por taller, recibe o placas",
    export_filename: "entregas.xlsx",
    sheet_name: "Entregas",
    date_field: "fecha",
    search_fields: &["taller", "recibe", "placas"],
    columns: &[
        ColumnSpec::text("Fecha", "fecha"),
        ColumnSpec::text("Taller", "taller"),
        ColumnSpec::text("Recibe", "recibe"),
        ColumnSpec::text("Marca", "marca"),
        ColumnSpec::text("Placas", "placas"),
        ColumnSpec::photo("Foto", "foto", 0),
    ],
};

/// All record types, in tab-strip order.
pub const ALL: &[&RecordSchema] = &[&VALES, &CORRALON, &ENTREGAS];

/// Look up a schema by its dashboard path segment.
pub fn by_slug(slug: &str) -> Option<&'static RecordSchema> {
    ALL.iter().copied().find(|s| s.slug == slug)
}
