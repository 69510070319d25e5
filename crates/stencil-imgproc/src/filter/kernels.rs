/// A 3x3 convolution kernel, indexed as `kernel[row][col]`.
pub type Kernel3x3 = [[f64; 3]; 3];

// NOTE: the order matches the discriminants of `Kernel3`
const KERNELS: [Kernel3x3; 6] = [
    // edge
    [[0.0, -1.0, 0.0], [-1.0, 4.0, -1.0], [0.0, -1.0, 0.0]],
    // sharpen
    [[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]],
    // box blur
    [
        [1.0 / 9.0, 1.0 / 9.0, 1.0 / 9.0],
        [1.0 / 9.0, 1.0 / 9.0, 1.0 / 9.0],
        [1.0 / 9.0, 1.0 / 9.0, 1.0 / 9.0],
    ],
    // gaussian blur
    [
        [1.0 / 16.0, 1.0 / 8.0, 1.0 / 16.0],
        [1.0 / 8.0, 1.0 / 4.0, 1.0 / 8.0],
        [1.0 / 16.0, 1.0 / 8.0, 1.0 / 16.0],
    ],
    // emboss
    [[-2.0, -1.0, 0.0], [-1.0, 1.0, 1.0], [0.0, 1.0, 2.0]],
    // identity
    [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]],
];

/// The fixed set of 3x3 filters.
///
/// Each variant resolves to a constant coefficient matrix via [`Kernel3::coefficients`].
/// Unknown filter names resolve to [`Kernel3::Identity`], which copies the image unchanged.
///
/// # Examples
///
/// ```
/// use stencil_imgproc::filter::kernels::Kernel3;
///
/// assert_eq!(Kernel3::from_name("gauss"), Kernel3::GaussianBlur);
/// assert_eq!(Kernel3::from_name("no-such-filter"), Kernel3::Identity);
/// assert_eq!(Kernel3::Identity.coefficients()[1][1], 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Kernel3 {
    /// Laplacian edge detection.
    Edge = 0,
    /// Laplacian sharpening.
    Sharpen = 1,
    /// Uniform 3x3 average.
    BoxBlur = 2,
    /// Binomial approximation of a gaussian.
    GaussianBlur = 3,
    /// Diagonal emboss.
    Emboss = 4,
    /// Copies the source pixel.
    #[default]
    Identity = 5,
}

impl Kernel3 {
    /// All filters, in table order.
    pub const ALL: [Kernel3; 6] = [
        Kernel3::Edge,
        Kernel3::Sharpen,
        Kernel3::BoxBlur,
        Kernel3::GaussianBlur,
        Kernel3::Emboss,
        Kernel3::Identity,
    ];

    /// The coefficient matrix of the filter.
    pub fn coefficients(&self) -> &'static Kernel3x3 {
        &KERNELS[*self as usize]
    }

    /// The name used to select the filter from the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Kernel3::Edge => "edge",
            Kernel3::Sharpen => "sharpen",
            Kernel3::BoxBlur => "blur",
            Kernel3::GaussianBlur => "gauss",
            Kernel3::Emboss => "emboss",
            Kernel3::Identity => "identity",
        }
    }

    /// Resolve a filter by name.
    ///
    /// Names are matched exactly. Anything unrecognized maps to [`Kernel3::Identity`].
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == name)
            .unwrap_or_default()
    }

    /// Whether `name` selects a filter other than through the identity fallback.
    pub fn is_known_name(name: &str) -> bool {
        Self::ALL.iter().any(|k| k.name() == name)
    }
}

impl From<&str> for Kernel3 {
    fn from(name: &str) -> Self {
        Kernel3::from_name(name)
    }
}

impl std::fmt::Display for Kernel3 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
