//! # Selector Predicates
//!
//! Spatial predicates applied to boulders streamed out of the catalog.
//!
//! Distances are planar: the circle test measures Euclidean distance on raw
//! degree values, not great-circle distance.

/// Anything with a position and a sector that a [`Selector`] can test.
pub trait Located {
    fn latitude(&self) -> f64;
    fn longitude(&self) -> f64;
    fn sector(&self) -> i64;
}

impl<L: Located + ?Sized> Located for &L {
    fn latitude(&self) -> f64 {
        (**self).latitude()
    }
    fn longitude(&self) -> f64 {
        (**self).longitude()
    }
    fn sector(&self) -> i64 {
        (**self).sector()
    }
}

/// A parsed `q` argument
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Selector {
    /// No `q` argument: every record passes
    #[default]
    All,

    /// `rect[min_lat, min_lon, max_lat, max_lon]`, bounds inclusive
    Rect {
        min_lat: f64,
        min_lon: f64,
        max_lat: f64,
        max_lon: f64,
    },

    /// `circle[lat, lon, diameter]`
    ///
    /// The third field is named `diameter` in the query language but is
    /// compared against the distance from the center, i.e. used as a radius.
    Circle { lat: f64, lon: f64, diameter: f64 },

    /// `sector[id]`
    Sector(i64),
}

impl Selector {
    /// Check whether a position/sector triple passes this selector
    pub fn matches(&self, latitude: f64, longitude: f64, sector: i64) -> bool {
        match *self {
            Selector::All => true,
            Selector::Rect {
                min_lat,
                min_lon,
                max_lat,
                max_lon,
            } => {
                (min_lat <= latitude && latitude <= max_lat)
                    && (min_lon <= longitude && longitude <= max_lon)
            }
            Selector::Circle { lat, lon, diameter } => {
                let diff_x = latitude - lat;
                let diff_y = longitude - lon;
                (diff_x * diff_x + diff_y * diff_y).sqrt() < diameter
            }
            Selector::Sector(id) => sector == id,
        }
    }

    /// Check whether a located record passes this selector
    pub fn includes<L: Located + ?Sized>(&self, item: &L) -> bool {
        self.matches(item.latitude(), item.longitude(), item.sector())
    }

    /// Lazily filter a stream of records
    pub fn filter<I>(self, items: I) -> impl Iterator<Item = I::Item>
    where
        I: IntoIterator,
        I::Item: Located,
    {
        items.into_iter().filter(move |item| self.includes(item))
    }
}
