//! Processing built-in API signature catalog
//!
//! A read-only registry of the Processing applet surface: every drawing,
//! transform, color, image and typography built-in the detectors need to
//! recognize, with one entry per overload. Each parameter position carries a
//! pixel flag, because whether an argument is an on-screen coordinate is not
//! derivable from its type alone (the first two floats of `rect()` are
//! coordinates, the last two are extents).
//!
//! The catalog is built once at process start and never mutated afterwards,
//! so it can be shared freely across threads.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::OnceLock;

/// A single parameter slot of a built-in signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiParameter {
    /// Semantic type name as Processing documents it (`float`, `PImage`, ...).
    pub type_name: &'static str,
    /// Whether this position holds an on-screen pixel coordinate.
    pub pixels: bool,
}

impl fmt::Display for ApiParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name)?;
        if self.pixels {
            write!(f, "*")?;
        }
        Ok(())
    }
}

/// Reference categories of the Processing API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Shape2d,
    ShapeCurves,
    Shape3d,
    ShapeAttributes,
    ShapeVertex,
    ShapeLoading,
    Transform,
    ColorSetting,
    ImageLoading,
    ImageTextures,
    ImagePixels,
    Rendering,
    RenderingShaders,
    TypographyLoading,
    TypographyAttributes,
    Math,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Shape2d => "Shape / 2D Primitives",
            Category::ShapeCurves => "Shape / Curves",
            Category::Shape3d => "Shape / 3D Primitives",
            Category::ShapeAttributes => "Shape / Attributes",
            Category::ShapeVertex => "Shape / Vertex",
            Category::ShapeLoading => "Shape / Loading & Displaying",
            Category::Transform => "Transform",
            Category::ColorSetting => "Color / Setting",
            Category::ImageLoading => "Image / Loading & Displaying",
            Category::ImageTextures => "Image / Textures",
            Category::ImagePixels => "Image / Pixels",
            Category::Rendering => "Rendering",
            Category::RenderingShaders => "Rendering / Shaders",
            Category::TypographyLoading => "Typography / Loading & Displaying",
            Category::TypographyAttributes => "Typography / Attributes",
            Category::Math => "Math",
        }
    }

    /// Whether this category belongs to the drawing-primitive family
    /// (the Shape category and its subcategories).
    pub fn is_drawing(&self) -> bool {
        matches!(
            self,
            Category::Shape2d
                | Category::ShapeCurves
                | Category::Shape3d
                | Category::ShapeAttributes
                | Category::ShapeVertex
                | Category::ShapeLoading
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One overload of a built-in operation.
///
/// Identity is (name, parameter count, parameter types); overloads sharing a
/// name are kept as separate entries in declaration order so arity-based
/// selection stays deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiSignature {
    pub name: &'static str,
    pub params: Vec<ApiParameter>,
    pub category: Category,
}

impl ApiSignature {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Display for ApiSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", p)?;
        }
        write!(f, ")")
    }
}

/// The immutable signature registry.
pub struct ApiCatalog {
    signatures: Vec<ApiSignature>,
    by_name: HashMap<&'static str, Vec<usize>>,
}

impl ApiCatalog {
    fn new() -> Self {
        Self {
            signatures: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    fn add(&mut self, name: &'static str, params: Vec<ApiParameter>, category: Category) {
        let idx = self.signatures.len();
        self.signatures.push(ApiSignature {
            name,
            params,
            category,
        });
        self.by_name.entry(name).or_default().push(idx);
    }

    /// All overloads registered under `name`, in declaration order.
    pub fn lookup(&self, name: &str) -> impl Iterator<Item = &ApiSignature> {
        self.by_name
            .get(name)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&i| &self.signatures[i])
    }

    /// Categories of every overload registered under `name`.
    pub fn categories_of(&self, name: &str) -> HashSet<Category> {
        self.lookup(name).map(|s| s.category).collect()
    }

    /// Overloads of `name` reachable through the implicit applet receiver
    /// (everything except the instance-method set).
    pub fn applet(&self, name: &str) -> impl Iterator<Item = &ApiSignature> {
        self.lookup(name).filter(|s| s.category != Category::Math)
    }

    /// Drawing-primitive overloads of `name` (Shape category family).
    pub fn drawing(&self, name: &str) -> impl Iterator<Item = &ApiSignature> {
        self.lookup(name).filter(|s| s.category.is_drawing())
    }

    /// Instance-method overloads of `name` (PVector surface).
    pub fn instance(&self, name: &str) -> impl Iterator<Item = &ApiSignature> {
        self.lookup(name).filter(|s| s.category == Category::Math)
    }

    /// Whether any overload of `name` is a drawing primitive.
    pub fn is_drawing_name(&self, name: &str) -> bool {
        self.drawing(name).next().is_some()
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

/// The lifecycle method the framework calls once at startup.
pub const SETUP_METHOD: &str = "setup";

/// The lifecycle method the framework calls once per frame.
pub const DRAW_METHOD: &str = "draw";

/// Input event handlers the framework dispatches to by name.
pub const EVENT_HANDLERS: [&str; 9] = [
    "mouseClicked",
    "mouseDragged",
    "mouseMoved",
    "mousePressed",
    "mouseReleased",
    "mouseWheel",
    "keyPressed",
    "keyReleased",
    "keyTyped",
];

/// Matrix-stack operations; an active transform changes what a hardcoded
/// coordinate means.
pub const MATRIX_METHODS: [&str; 2] = ["pushMatrix", "popMatrix"];

/// Whether `name` collides with a framework-dispatched lifecycle method.
pub fn is_reserved_lifecycle_name(name: &str) -> bool {
    name == SETUP_METHOD || name == DRAW_METHOD || EVENT_HANDLERS.contains(&name)
}

const FLOAT_PIXEL: ApiParameter = ApiParameter {
    type_name: "float",
    pixels: true,
};
const FLOAT: ApiParameter = ApiParameter {
    type_name: "float",
    pixels: false,
};
const INT_PIXEL: ApiParameter = ApiParameter {
    type_name: "int",
    pixels: true,
};
const INT: ApiParameter = ApiParameter {
    type_name: "int",
    pixels: false,
};
const PSHAPE: ApiParameter = ApiParameter {
    type_name: "PShape",
    pixels: false,
};
const PIMAGE: ApiParameter = ApiParameter {
    type_name: "PImage",
    pixels: false,
};
const PSHADER: ApiParameter = ApiParameter {
    type_name: "PShader",
    pixels: false,
};
const PVECTOR: ApiParameter = ApiParameter {
    type_name: "PVector",
    pixels: false,
};
const PFONT: ApiParameter = ApiParameter {
    type_name: "PFont",
    pixels: false,
};
const STRING: ApiParameter = ApiParameter {
    type_name: "String",
    pixels: false,
};
const CHAR: ApiParameter = ApiParameter {
    type_name: "char",
    pixels: false,
};
const CHAR_ARRAY: ApiParameter = ApiParameter {
    type_name: "char[]",
    pixels: false,
};
const FLOAT_ARRAY: ApiParameter = ApiParameter {
    type_name: "float[]",
    pixels: false,
};

/// `amount` float parameters, the first `pixel_prefix` of them pixel-tagged.
fn floats(amount: usize, pixel_prefix: usize) -> Vec<ApiParameter> {
    (0..amount)
        .map(|i| if i < pixel_prefix { FLOAT_PIXEL } else { FLOAT })
        .collect()
}

/// `amount` int parameters, the first `pixel_prefix` of them pixel-tagged.
fn ints(amount: usize, pixel_prefix: usize) -> Vec<ApiParameter> {
    (0..amount)
        .map(|i| if i < pixel_prefix { INT_PIXEL } else { INT })
        .collect()
}

fn prefixed(head: &[ApiParameter], tail: Vec<ApiParameter>) -> Vec<ApiParameter> {
    let mut params = head.to_vec();
    params.extend(tail);
    params
}

fn build() -> ApiCatalog {
    use Category::*;

    let mut c = ApiCatalog::new();

    // Shape / 2D primitives
    c.add("arc", floats(4, 2), Shape2d);
    c.add("arc", floats(6, 2), Shape2d);
    c.add("circle", floats(3, 2), Shape2d);
    c.add("ellipse", floats(4, 2), Shape2d);
    c.add("line", floats(4, 4), Shape2d);
    c.add("line", floats(6, 6), Shape2d);
    c.add("point", floats(2, 2), Shape2d);
    c.add("point", floats(3, 3), Shape2d);
    c.add("quad", floats(8, 8), Shape2d);
    c.add("rect", floats(4, 2), Shape2d);
    c.add("rect", floats(5, 2), Shape2d);
    c.add("rect", floats(8, 2), Shape2d);
    c.add("square", floats(3, 2), Shape2d);
    c.add("triangle", floats(6, 6), Shape2d);

    // Shape / curves
    c.add("bezier", floats(8, 8), ShapeCurves);
    c.add("bezier", floats(12, 12), ShapeCurves);
    c.add("bezierPoint", floats(5, 4), ShapeCurves);
    c.add("bezierTangent", floats(5, 4), ShapeCurves);
    c.add("curve", floats(8, 8), ShapeCurves);
    c.add("curve", floats(12, 12), ShapeCurves);
    c.add("curvePoint", floats(5, 4), ShapeCurves);
    c.add("curveTangent", floats(5, 4), ShapeCurves);

    // Shape / 3D primitives
    c.add("box", floats(1, 1), Shape3d);
    c.add("box", floats(3, 3), Shape3d);
    c.add("sphere", floats(1, 1), Shape3d);

    // Shape / attributes
    c.add("ellipseMode", vec![INT], ShapeAttributes);
    c.add("rectMode", vec![INT], ShapeAttributes);
    c.add("strokeCap", vec![INT], ShapeAttributes);
    c.add("strokeJoin", vec![INT], ShapeAttributes);
    c.add("strokeWeight", vec![FLOAT], ShapeAttributes);

    // Shape / vertex
    c.add("vertex", floats(2, 2), ShapeVertex);
    c.add("vertex", floats(3, 3), ShapeVertex);
    c.add("vertex", vec![FLOAT_ARRAY], ShapeVertex);
    c.add("vertex", floats(4, 4), ShapeVertex);
    c.add("vertex", floats(5, 5), ShapeVertex);
    c.add("bezierVertex", floats(6, 6), ShapeVertex);
    c.add("bezierVertex", floats(9, 9), ShapeVertex);
    c.add("curveVertex", floats(2, 2), ShapeVertex);
    c.add("curveVertex", floats(3, 3), ShapeVertex);
    c.add("quadraticVertex", floats(4, 4), ShapeVertex);
    c.add("quadraticVertex", floats(6, 6), ShapeVertex);
    c.add("beginContour", vec![], ShapeVertex);
    c.add("endContour", vec![], ShapeVertex);
    c.add("beginShape", vec![], ShapeVertex);
    c.add("beginShape", vec![INT], ShapeVertex);
    c.add("endShape", vec![], ShapeVertex);
    c.add("endShape", vec![INT], ShapeVertex);

    // Shape / loading & displaying
    c.add("shape", vec![PSHAPE], ShapeLoading);
    c.add("shape", prefixed(&[PSHAPE], floats(2, 2)), ShapeLoading);
    c.add("shape", prefixed(&[PSHAPE], floats(4, 4)), ShapeLoading);

    // Transform
    c.add("pushMatrix", vec![], Transform);
    c.add("popMatrix", vec![], Transform);
    c.add("resetMatrix", vec![], Transform);
    c.add("applyMatrix", floats(6, 0), Transform);
    c.add("applyMatrix", floats(16, 0), Transform);
    c.add("rotate", vec![FLOAT], Transform);
    c.add("rotateX", vec![FLOAT], Transform);
    c.add("rotateY", vec![FLOAT], Transform);
    c.add("rotateZ", vec![FLOAT], Transform);
    c.add("scale", floats(1, 0), Transform);
    c.add("scale", floats(2, 0), Transform);
    c.add("scale", floats(3, 0), Transform);
    c.add("shearX", vec![FLOAT], Transform);
    c.add("shearY", vec![FLOAT], Transform);
    c.add("translate", floats(2, 0), Transform);
    c.add("translate", floats(3, 0), Transform);

    // Color / setting
    c.add("background", vec![INT], ColorSetting);
    c.add("background", vec![INT, FLOAT], ColorSetting);
    c.add("background", floats(1, 0), ColorSetting);
    c.add("background", floats(2, 0), ColorSetting);
    c.add("background", floats(3, 0), ColorSetting);
    c.add("background", floats(4, 0), ColorSetting);
    c.add("background", vec![PIMAGE], ColorSetting);
    c.add("colorMode", vec![INT], ColorSetting);
    c.add("colorMode", vec![INT, FLOAT], ColorSetting);
    c.add("colorMode", prefixed(&[INT], floats(3, 0)), ColorSetting);
    c.add("colorMode", prefixed(&[INT], floats(4, 0)), ColorSetting);
    c.add("fill", vec![INT], ColorSetting);
    c.add("fill", vec![INT, FLOAT], ColorSetting);
    c.add("fill", floats(1, 0), ColorSetting);
    c.add("fill", floats(2, 0), ColorSetting);
    c.add("fill", floats(3, 0), ColorSetting);
    c.add("fill", floats(4, 0), ColorSetting);
    c.add("noFill", vec![], ColorSetting);
    c.add("stroke", vec![INT], ColorSetting);
    c.add("stroke", vec![INT, FLOAT], ColorSetting);
    c.add("stroke", floats(1, 0), ColorSetting);
    c.add("stroke", floats(2, 0), ColorSetting);
    c.add("stroke", floats(3, 0), ColorSetting);
    c.add("stroke", floats(4, 0), ColorSetting);
    c.add("noStroke", vec![], ColorSetting);

    // Image / loading & displaying
    c.add("image", prefixed(&[PIMAGE], floats(2, 2)), ImageLoading);
    c.add("image", prefixed(&[PIMAGE], floats(4, 4)), ImageLoading);
    c.add("tint", vec![INT], ImageLoading);
    c.add("tint", vec![INT, FLOAT], ImageLoading);
    c.add("tint", floats(1, 0), ImageLoading);
    c.add("tint", floats(2, 0), ImageLoading);
    c.add("tint", floats(3, 0), ImageLoading);
    c.add("tint", floats(4, 0), ImageLoading);
    c.add("noTint", vec![], ImageLoading);

    // Image / textures
    c.add("texture", vec![PIMAGE], ImageTextures);

    // Image / pixels
    c.add("blend", ints(9, 8), ImagePixels);
    c.add("blend", prefixed(&[PIMAGE], ints(9, 8)), ImagePixels);
    c.add("copy", vec![], ImagePixels);
    c.add("copy", ints(8, 8), ImagePixels);
    c.add("copy", prefixed(&[PIMAGE], ints(8, 8)), ImagePixels);
    c.add("filter", vec![PSHADER], ImagePixels);
    c.add("filter", vec![INT], ImagePixels);
    c.add("filter", vec![INT, FLOAT], ImagePixels);
    c.add("set", ints(3, 2), ImagePixels);
    c.add("set", prefixed(&ints(2, 2), vec![PIMAGE]), ImagePixels);
    c.add("updatePixels", vec![], ImagePixels);

    // Rendering
    c.add("blendMode", vec![INT], Rendering);
    c.add("clip", floats(4, 2), Rendering);
    c.add("noClip", vec![], Rendering);
    c.add("shader", vec![PSHADER], RenderingShaders);
    c.add("shader", vec![PSHADER, INT], RenderingShaders);
    c.add("resetShader", vec![], RenderingShaders);
    c.add("resetShader", vec![INT], RenderingShaders);

    // Typography / loading & displaying
    c.add("text", prefixed(&[CHAR], floats(2, 2)), TypographyLoading);
    c.add("text", prefixed(&[CHAR], floats(3, 3)), TypographyLoading);
    c.add("text", prefixed(&[STRING], floats(2, 2)), TypographyLoading);
    c.add(
        "text",
        prefixed(&[CHAR_ARRAY, INT, INT], floats(2, 2)),
        TypographyLoading,
    );
    c.add("text", prefixed(&[STRING], floats(3, 3)), TypographyLoading);
    c.add(
        "text",
        prefixed(&[CHAR_ARRAY, INT, INT], floats(3, 3)),
        TypographyLoading,
    );
    c.add("text", prefixed(&[STRING], floats(4, 4)), TypographyLoading);
    c.add("text", prefixed(&[INT], floats(2, 2)), TypographyLoading);
    c.add("text", prefixed(&[INT], floats(3, 3)), TypographyLoading);
    c.add("text", prefixed(&[FLOAT], floats(2, 2)), TypographyLoading);
    c.add("text", prefixed(&[FLOAT], floats(3, 3)), TypographyLoading);
    c.add("textFont", vec![PFONT], TypographyLoading);
    c.add("textFont", vec![PFONT, INT], TypographyLoading);

    // Typography / attributes
    c.add("textAlign", ints(1, 0), TypographyAttributes);
    c.add("textAlign", ints(2, 0), TypographyAttributes);
    c.add("textLeading", vec![FLOAT], TypographyAttributes);
    c.add("textSize", vec![FLOAT], TypographyAttributes);

    // PVector instance methods
    c.add("add", vec![PVECTOR], Math);
    c.add("cross", vec![PVECTOR], Math);
    c.add("dist", vec![PVECTOR], Math);
    c.add("div", floats(1, 0), Math);
    c.add("dot", vec![PVECTOR], Math);
    c.add("get", vec![], Math);
    c.add("heading", vec![], Math);
    c.add("lerp", vec![PVECTOR, FLOAT], Math);
    c.add("limit", floats(1, 0), Math);
    c.add("mag", vec![], Math);
    c.add("magSq", vec![], Math);
    c.add("mult", floats(1, 0), Math);
    c.add("normalize", vec![], Math);
    c.add("rotate", floats(1, 0), Math);
    c.add("setMag", floats(1, 0), Math);
    c.add("sub", vec![PVECTOR], Math);

    c
}

/// The process-wide catalog instance.
pub fn builtins() -> &'static ApiCatalog {
    static CATALOG: OnceLock<ApiCatalog> = OnceLock::new();
    CATALOG.get_or_init(build)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_populated() {
        let catalog = builtins();
        assert!(catalog.len() > 120);
    }

    #[test]
    fn test_lookup_preserves_overloads_in_order() {
        let catalog = builtins();
        let arities: Vec<usize> = catalog.lookup("rect").map(|s| s.arity()).collect();
        assert_eq!(arities, vec![4, 5, 8]);
    }

    #[test]
    fn test_every_signature_retrievable_by_name() {
        let catalog = builtins();
        for sig in catalog.signatures.iter() {
            assert!(
                catalog.lookup(sig.name).any(|s| s == sig),
                "signature {} not retrievable",
                sig
            );
        }
    }

    #[test]
    fn test_categories_of_rotate_spans_transform_and_math() {
        let catalog = builtins();
        let cats = catalog.categories_of("rotate");
        assert!(cats.contains(&Category::Transform));
        assert!(cats.contains(&Category::Math));
    }

    #[test]
    fn test_drawing_family() {
        let catalog = builtins();
        assert!(catalog.is_drawing_name("ellipse"));
        assert!(catalog.is_drawing_name("vertex"));
        assert!(catalog.is_drawing_name("strokeWeight"));
        assert!(!catalog.is_drawing_name("pushMatrix"));
        assert!(!catalog.is_drawing_name("background"));
        assert!(!catalog.is_drawing_name("frameRate"));
    }

    #[test]
    fn test_pixel_tagging() {
        let catalog = builtins();
        let rect = catalog.lookup("rect").next().unwrap();
        assert!(rect.params[0].pixels);
        assert!(rect.params[1].pixels);
        assert!(!rect.params[2].pixels);
        assert!(!rect.params[3].pixels);

        // scale arguments are factors, not coordinates
        for sig in catalog.lookup("scale") {
            assert!(sig.params.iter().all(|p| !p.pixels));
        }
    }

    #[test]
    fn test_signature_display() {
        let catalog = builtins();
        let square = catalog.lookup("square").next().unwrap();
        assert_eq!(square.to_string(), "square(float*, float*, float)");
    }

    #[test]
    fn test_reserved_names() {
        assert!(is_reserved_lifecycle_name("draw"));
        assert!(is_reserved_lifecycle_name("setup"));
        assert!(is_reserved_lifecycle_name("mousePressed"));
        assert!(!is_reserved_lifecycle_name("drawTree"));
        assert!(!is_reserved_lifecycle_name("d"));
    }
}
