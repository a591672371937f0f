// Bundled demo dataset
//
// Four cities and fifteen events. Bucharest listings are scheduled relative
// to the current day (today, tomorrow, next week); the others are undated.

use chrono::{Days, NaiveDate};

use crate::models::{City, Event, EventImage};

const CDN: &str = "https://cdn.tiqets.com/wordpress/blog/wp-content/uploads";

/// Scheduling of a sample event, as day offsets from "today".
#[derive(Clone, Copy)]
enum Schedule {
    Undated,
    Dated {
        date: u64,
        available: &'static [u64],
    },
}

const TODAY: u64 = 0;
const TOMORROW: u64 = 1;
const NEXT_WEEK: u64 = 7;

struct Row {
    id: u64,
    title: &'static str,
    description: &'static str,
    city_id: &'static str,
    price: f64,
    price_eur: f64,
    currency: &'static str,
    rating: f64,
    rating_count: u64,
    kind: &'static str,
    checkout_disabled: bool,
    schedule: Schedule,
    images: &'static [(&'static str, &'static str)],
    booking_url: &'static str,
}

pub fn cities() -> Vec<City> {
    vec![
        City::new("c76753", "Bucharest", "Romania", "RO"),
        City::new("c67097", "Paris", "France", "FR"),
        City::new("c51381", "London", "United Kingdom", "GB"),
        City::new("c47717", "Rome", "Italy", "IT"),
    ]
}

/// Materialise the event table with dates anchored at `today`.
pub fn events(today: NaiveDate) -> Vec<Event> {
    let cities = cities();
    ROWS.iter()
        .map(|row| {
            let (city, country) = cities
                .iter()
                .find(|c| c.id == row.city_id)
                .map(|c| (c.name.clone(), c.country.clone()))
                .unwrap_or_default();

            let (date, available_dates) = match row.schedule {
                Schedule::Undated => (None, Vec::new()),
                Schedule::Dated { date, available } => (
                    Some(offset(today, date)),
                    available.iter().map(|&d| offset(today, d)).collect(),
                ),
            };

            Event {
                id: row.id,
                title: row.title.to_owned(),
                description: row.description.to_owned(),
                city,
                city_id: row.city_id.to_owned(),
                country,
                price: row.price,
                price_eur: Some(row.price_eur),
                currency: row.currency.to_owned(),
                rating: row.rating,
                rating_count: row.rating_count,
                kind: row.kind.to_owned(),
                is_checkout_disabled: row.checkout_disabled,
                booking_url: row.booking_url.to_owned(),
                date,
                available_dates,
                images: row
                    .images
                    .iter()
                    .map(|&(path, alt)| EventImage {
                        url: format!("{CDN}/{path}"),
                        alt: alt.to_owned(),
                    })
                    .collect(),
            }
        })
        .collect()
}

fn offset(today: NaiveDate, days: u64) -> String {
    today
        .checked_add_days(Days::new(days))
        .unwrap_or(today)
        .format("%Y-%m-%d")
        .to_string()
}

const ALL_THREE: &[u64] = &[TODAY, TOMORROW, NEXT_WEEK];

static ROWS: &[Row] = &[
    Row {
        id: 976_227,
        title: "Palace of the Parliament Tour",
        description: "Guided tour of one of the largest buildings in the world. Experience the opulence and grandeur of Romania's most iconic landmark with expert guides.",
        city_id: "c76753",
        price: 32.90,
        price_eur: 32.90,
        currency: "EUR",
        rating: 4.3,
        rating_count: 651,
        kind: "tour",
        checkout_disabled: false,
        schedule: Schedule::Dated {
            date: TODAY,
            available: ALL_THREE,
        },
        images: &[
            (
                "2019/03/27093459/Palace-of-the-Parliament-Bucharest.jpg",
                "Palace of the Parliament exterior",
            ),
            (
                "2019/03/27093500/Palace-Parliament-Interior.jpg",
                "Palace interior",
            ),
        ],
        booking_url: "https://www.tiqets.com/en/bucharest-attractions/palace-of-the-parliament/",
    },
    Row {
        id: 976_228,
        title: "National Museum of Art of Romania",
        description: "Explore Romania's finest art collection in the former Royal Palace. Discover medieval art, Romanian masters, and European galleries featuring Rembrandt, El Greco, and more.",
        city_id: "c76753",
        price: 15.00,
        price_eur: 15.00,
        currency: "EUR",
        rating: 4.5,
        rating_count: 423,
        kind: "museum",
        checkout_disabled: false,
        schedule: Schedule::Dated {
            date: TODAY,
            available: &[TODAY, TOMORROW],
        },
        images: &[(
            "2019/08/12105632/national-museum-art-bucharest.jpg",
            "National Museum building",
        )],
        booking_url: "https://www.tiqets.com/en/bucharest-attractions/national-museum-art/",
    },
    Row {
        id: 976_229,
        title: "Village Museum (Muzeul Satului) Entry",
        description: "Step into rural Romania at this open-air museum. Over 300 authentic buildings from villages across the country, showcasing traditional architecture and lifestyle.",
        city_id: "c76753",
        price: 8.50,
        price_eur: 8.50,
        currency: "EUR",
        rating: 4.6,
        rating_count: 892,
        kind: "museum",
        checkout_disabled: false,
        schedule: Schedule::Dated {
            date: TODAY,
            available: ALL_THREE,
        },
        images: &[(
            "2019/09/15114521/village-museum-bucharest.jpg",
            "Traditional Romanian houses",
        )],
        booking_url: "https://www.tiqets.com/en/bucharest-attractions/village-museum/",
    },
    Row {
        id: 976_230,
        title: "Bucharest Old Town Walking Tour",
        description: "Discover the historic heart of Bucharest on this guided walking tour. Explore hidden courtyards, beautiful churches, and hear fascinating stories of the city's past.",
        city_id: "c76753",
        price: 18.00,
        price_eur: 18.00,
        currency: "EUR",
        rating: 4.7,
        rating_count: 567,
        kind: "tour",
        checkout_disabled: false,
        schedule: Schedule::Dated {
            date: TOMORROW,
            available: &[TOMORROW, NEXT_WEEK],
        },
        images: &[(
            "2019/07/18142315/bucharest-old-town.jpg",
            "Old Town street view",
        )],
        booking_url: "https://www.tiqets.com/en/bucharest-attractions/old-town-walking-tour/",
    },
    Row {
        id: 976_231,
        title: "Therme Bucharest Wellness & Spa",
        description: "Relax at Europe's largest wellness center. Enjoy thermal pools, saunas, water slides, botanical gardens, and multiple relaxation zones all under one roof.",
        city_id: "c76753",
        price: 28.00,
        price_eur: 28.00,
        currency: "EUR",
        rating: 4.8,
        rating_count: 1_245,
        kind: "attraction",
        checkout_disabled: false,
        schedule: Schedule::Dated {
            date: TOMORROW,
            available: ALL_THREE,
        },
        images: &[("2020/01/22134521/therme-bucharest.jpg", "Thermal pools")],
        booking_url: "https://www.tiqets.com/en/bucharest-attractions/therme-bucharest/",
    },
    Row {
        id: 976_232,
        title: "Romanian Athenaeum Concert",
        description: "Experience a classical music concert in Bucharest's most beautiful concert hall. This architectural gem hosts the George Enescu Philharmonic Orchestra.",
        city_id: "c76753",
        price: 25.00,
        price_eur: 25.00,
        currency: "EUR",
        rating: 4.9,
        rating_count: 387,
        kind: "concert",
        checkout_disabled: false,
        schedule: Schedule::Dated {
            date: NEXT_WEEK,
            available: &[NEXT_WEEK],
        },
        images: &[(
            "2019/11/05153421/romanian-athenaeum.jpg",
            "Athenaeum concert hall",
        )],
        booking_url: "https://www.tiqets.com/en/bucharest-attractions/romanian-athenaeum/",
    },
    Row {
        id: 976_233,
        title: "Bran Castle & Peles Castle Day Trip from Bucharest",
        description: "Visit Dracula's legendary castle and the stunning Peles Castle on this full-day tour from Bucharest. Includes transportation, guided tours, and free time in Brasov.",
        city_id: "c76753",
        price: 65.00,
        price_eur: 65.00,
        currency: "EUR",
        rating: 4.7,
        rating_count: 934,
        kind: "tour",
        checkout_disabled: false,
        schedule: Schedule::Dated {
            date: NEXT_WEEK,
            available: &[NEXT_WEEK],
        },
        images: &[("2019/04/16095521/bran-castle-dracula.jpg", "Bran Castle")],
        booking_url: "https://www.tiqets.com/en/bucharest-attractions/bran-castle-day-trip/",
    },
    Row {
        id: 976_234,
        title: "Bucharest Food & Wine Tasting Tour",
        description: "Taste traditional Romanian cuisine and local wines on this guided food tour. Visit local markets, family-run restaurants, and hidden gems known only to locals.",
        city_id: "c76753",
        price: 42.00,
        price_eur: 42.00,
        currency: "EUR",
        rating: 4.8,
        rating_count: 512,
        kind: "food_tour",
        checkout_disabled: false,
        schedule: Schedule::Dated {
            date: NEXT_WEEK,
            available: ALL_THREE,
        },
        images: &[(
            "2019/10/08163245/romanian-food-tour.jpg",
            "Traditional Romanian dishes",
        )],
        booking_url: "https://www.tiqets.com/en/bucharest-attractions/food-wine-tour/",
    },
    Row {
        id: 123_456,
        title: "Eiffel Tower Summit Access",
        description: "Skip the line and ascend to the summit of Paris's most iconic landmark. Enjoy breathtaking views of the City of Lights from the top.",
        city_id: "c67097",
        price: 35.50,
        price_eur: 35.50,
        currency: "EUR",
        rating: 4.7,
        rating_count: 12_543,
        kind: "attraction",
        checkout_disabled: false,
        schedule: Schedule::Undated,
        images: &[("2018/06/19132137/eiffel-tower-paris.jpg", "Eiffel Tower")],
        booking_url: "https://www.tiqets.com/en/paris-attractions/eiffel-tower/",
    },
    Row {
        id: 234_567,
        title: "Louvre Museum Skip-the-Line",
        description: "Explore the world's largest art museum with priority access. See the Mona Lisa, Venus de Milo, and thousands of masterpieces.",
        city_id: "c67097",
        price: 22.00,
        price_eur: 22.00,
        currency: "EUR",
        rating: 4.6,
        rating_count: 8_932,
        kind: "museum",
        checkout_disabled: false,
        schedule: Schedule::Undated,
        images: &[("2018/08/22095555/louvre-museum-paris.jpg", "Louvre Museum")],
        booking_url: "https://www.tiqets.com/en/paris-attractions/louvre-museum/",
    },
    Row {
        id: 345_678,
        title: "Tower of London Tickets",
        description: "Discover 1000 years of history at this iconic fortress. See the Crown Jewels and meet the famous ravens.",
        city_id: "c51381",
        price: 40.50,
        price_eur: 47.30,
        currency: "GBP",
        rating: 4.5,
        rating_count: 6_754,
        kind: "attraction",
        checkout_disabled: false,
        schedule: Schedule::Undated,
        images: &[("2019/05/14133759/tower-of-london.jpg", "Tower of London")],
        booking_url: "https://www.tiqets.com/en/london-attractions/tower-of-london/",
    },
    Row {
        id: 456_789,
        title: "Colosseum & Roman Forum Tour",
        description: "Walk through ancient Rome with an expert guide. Explore the Colosseum, Roman Forum, and Palatine Hill.",
        city_id: "c47717",
        price: 54.00,
        price_eur: 54.00,
        currency: "EUR",
        rating: 4.8,
        rating_count: 15_234,
        kind: "tour",
        checkout_disabled: false,
        schedule: Schedule::Undated,
        images: &[("2018/10/02133854/colosseum-rome.jpg", "Colosseum")],
        booking_url: "https://www.tiqets.com/en/rome-attractions/colosseum/",
    },
    Row {
        id: 567_890,
        title: "Vatican Museums & Sistine Chapel",
        description: "Skip the line at the Vatican Museums. Marvel at Michelangelo's ceiling in the Sistine Chapel and explore priceless art collections.",
        city_id: "c47717",
        price: 38.00,
        price_eur: 38.00,
        currency: "EUR",
        rating: 4.7,
        rating_count: 11_456,
        kind: "museum",
        checkout_disabled: false,
        schedule: Schedule::Undated,
        images: &[("2019/01/24111739/sistine-chapel.jpg", "Sistine Chapel")],
        booking_url: "https://www.tiqets.com/en/rome-attractions/vatican-museums/",
    },
    Row {
        id: 678_901,
        title: "British Museum Free Entry",
        description: "Explore human history from ancient civilizations to modern times. See the Rosetta Stone, Egyptian mummies, and more.",
        city_id: "c51381",
        price: 0.00,
        price_eur: 0.00,
        currency: "GBP",
        rating: 4.6,
        rating_count: 9_876,
        kind: "museum",
        checkout_disabled: true,
        schedule: Schedule::Undated,
        images: &[("2019/02/19141823/british-museum.jpg", "British Museum")],
        booking_url: "https://www.britishmuseum.org/",
    },
    Row {
        id: 789_012,
        title: "Arc de Triomphe Rooftop",
        description: "Climb to the top of this iconic monument for panoramic views of Paris. Learn about French history and Napoleon.",
        city_id: "c67097",
        price: 16.00,
        price_eur: 16.00,
        currency: "EUR",
        rating: 4.4,
        rating_count: 4_567,
        kind: "attraction",
        checkout_disabled: false,
        schedule: Schedule::Undated,
        images: &[("2019/03/15142234/arc-de-triomphe.jpg", "Arc de Triomphe")],
        booking_url: "https://www.tiqets.com/en/paris-attractions/arc-de-triomphe/",
    },
];
