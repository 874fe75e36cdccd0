//! Domain variant tables
//!
//! Variants are written the way they show up in category pickers and
//! listing forms. They are normalized once when the tables are first used.

use once_cell::sync::Lazy;

use super::Domain;
use super::industrial::INDUSTRIAL_GROUPS;
use super::normalize::{Slug, normalize};

/// Order in which domain tables are consulted, first match wins
///
/// Automotive and education have short, specific lists and go first so the
/// broader tables cannot swallow them. Beauty sits ahead of the generic place
/// table. Industrial is not part of this walk, see `classify_domain`.
pub const DOMAIN_PRECEDENCE: &[Domain] = &[
    Domain::Automotive,
    Domain::Education,
    Domain::Food,
    Domain::Hospital,
    Domain::Hotel,
    Domain::Beauty,
    Domain::RealEstate,
    Domain::Shopping,
    Domain::PlaceGeneric,
    Domain::WorkerGeneric,
];

const AUTOMOTIVE: &[&str] = &[
    "Car Repair",
    "Car Service",
    "Car Wash",
    "Car Mechanic",
    "Bike Repair",
    "Bike Service",
    "Two Wheeler Service",
    "Tyre Shop",
    "Auto Parts",
    "Car Showroom",
    "Bike Showroom",
    "Car Rentals",
];

const EDUCATION: &[&str] = &[
    "Schools",
    "Colleges",
    "Coaching Centres",
    "Tuition",
    "Play School",
    "Driving School",
    "Music Classes",
    "Dance Classes",
    "Computer Institute",
];

const FOOD: &[&str] = &[
    "Restaurants",
    "Biryani",
    "Fast Food",
    "Street Food",
    "Bakery",
    "Cafe",
    "Sweet Shop",
    "Tiffin Centre",
    "Juice Centre",
    "Ice Cream Parlour",
    "Catering",
    "Cloud Kitchen",
];

const HOSPITAL: &[&str] = &[
    "Hospitals",
    "Multi Speciality Hospital",
    "Clinic",
    "Dental Clinic",
    "Eye Hospital",
    "Diagnostic Centre",
    "Pharmacy",
    "Medical Store",
    "Cardiologist",
    "Pediatrician",
    "Physiotherapy",
];

const HOTEL: &[&str] = &[
    "Hotels",
    "Lodges",
    "Resorts",
    "Guest House",
    "PG Hostels",
    "Service Apartments",
    "Homestay",
];

const BEAUTY: &[&str] = &[
    "Beauty Parlour",
    "Salon",
    "Spa",
    "Spa & Massage",
    "Makeup Artist",
    "Bridal Makeup",
    "Mehendi Artist",
    "Nail Studio",
    "Barber Shop",
    "Skin Care",
];

const REAL_ESTATE: &[&str] = &[
    "Real Estate Agents",
    "Apartments For Sale",
    "Flats",
    "Plots",
    "Villas",
    "Independent House",
    "Rental Houses",
    "Commercial Property",
];

const SHOPPING: &[&str] = &[
    "Supermarket",
    "Grocery Store",
    "Clothing Store",
    "Electronics",
    "Mobile Shop",
    "Footwear",
    "Jewellery",
    "Furniture",
    "Stationery",
];

const PLACE_GENERIC: &[&str] = &[
    "Temples",
    "Parks",
    "Salon",
    "Gyms",
    "Banks",
    "ATM Centre",
    "Petrol Bunk",
    "Police Station",
    "Post Office",
    "Function Halls",
    "Theatres",
];

const WORKER_GENERIC: &[&str] = &[
    "Plumber",
    "Electrician",
    "Carpenter",
    "Painter",
    "House Maid",
    "Cook",
    "Driver",
    "Security Guard",
    "AC Repair",
    "Laundry",
    "Tailor",
    "Pest Control",
];

const INDUSTRIAL_TOP_LEVEL: &[&str] = &["Industrial Services", "Industrial"];

/// A domain with its accepted label variants
#[derive(Debug)]
pub struct TaxonomyTable {
    domain: Domain,
    variants: Vec<&'static str>,
    normalized: Vec<Slug>,
}

impl TaxonomyTable {
    fn new(domain: Domain, variants: Vec<&'static str>) -> Self {
        let normalized = variants.iter().map(|v| normalize(v)).collect();
        Self {
            domain,
            variants,
            normalized,
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Variants as written in the table
    pub fn variants(&self) -> &[&'static str] {
        &self.variants
    }

    /// (raw variant, normalized variant) pairs in table order
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &Slug)> {
        self.variants.iter().copied().zip(self.normalized.iter())
    }
}

static TABLES: Lazy<Vec<TaxonomyTable>> = Lazy::new(|| {
    let industrial: Vec<&'static str> = INDUSTRIAL_TOP_LEVEL
        .iter()
        .copied()
        .chain(INDUSTRIAL_GROUPS.iter().flat_map(|g| g.variants.iter().copied()))
        .collect();

    let tables: Vec<TaxonomyTable> = Domain::all_variants()
        .iter()
        .map(|domain| {
            let variants = match domain {
                Domain::Automotive => AUTOMOTIVE.to_vec(),
                Domain::Education => EDUCATION.to_vec(),
                Domain::Food => FOOD.to_vec(),
                Domain::Hospital => HOSPITAL.to_vec(),
                Domain::Hotel => HOTEL.to_vec(),
                Domain::Beauty => BEAUTY.to_vec(),
                Domain::RealEstate => REAL_ESTATE.to_vec(),
                Domain::Shopping => SHOPPING.to_vec(),
                Domain::PlaceGeneric => PLACE_GENERIC.to_vec(),
                Domain::WorkerGeneric => WORKER_GENERIC.to_vec(),
                Domain::Industrial => industrial.clone(),
            };
            TaxonomyTable::new(*domain, variants)
        })
        .collect();

    log::debug!(
        "Taxonomy tables initialized: {} domains, {} variants",
        tables.len(),
        tables.iter().map(|t| t.variants.len()).sum::<usize>()
    );

    tables
});

/// All tables in `Domain::all_variants()` order
pub fn tables() -> &'static [TaxonomyTable] {
    &TABLES
}

/// Table for a single domain
pub fn table_for(domain: Domain) -> &'static TaxonomyTable {
    // Every domain gets a table at initialization
    TABLES
        .iter()
        .find(|t| t.domain == domain)
        .unwrap_or_else(|| unreachable!("no taxonomy table for {}", domain))
}
