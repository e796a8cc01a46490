mod booking;
mod estimate;
mod route;
mod trip;

pub use booking::{Booking, BookingRequest, PassengerContact, Status};
pub use estimate::{
    DayType, EstimateRecord, FareBreakdown, PriceEstimate, PriceRange, RateConditions, ReturnType,
    TimeOfDay, VehicleClassPrice,
};
pub use route::{RouteInfo, FALLBACK_DISTANCE_METERS, FALLBACK_DURATION_SECONDS};
pub use trip::TripRequest;
