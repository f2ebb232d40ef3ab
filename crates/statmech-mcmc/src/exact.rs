//! Closed-form thermodynamics of the infinite 1-D Ising chain, used to sanity
//! check sampled averages. All quantities are per site with `k_B = 1`.

/// Energy per site at zero field: `-J tanh(J / T)`.
pub fn energy_per_site_zero_field(coupling: f64, temperature: f64) -> f64 {
    -coupling * (coupling / temperature).tanh()
}

/// Magnetization per site in a field `H`.
///
/// `m = sinh(H/T) / sqrt(sinh²(H/T) + exp(-4J/T))`.
pub fn magnetization_per_site(coupling: f64, field: f64, temperature: f64) -> f64 {
    let beta = 1.0 / temperature;
    let sinh = (beta * field).sinh();
    sinh / (sinh * sinh + (-4.0 * beta * coupling).exp()).sqrt()
}

/// Specific heat per site at zero field: `(J/T)² sech²(J/T)`.
pub fn specific_heat_zero_field(coupling: f64, temperature: f64) -> f64 {
    let k = coupling / temperature;
    let sech = 1.0 / k.cosh();
    k * k * sech * sech
}

/// Zero-field susceptibility per site: `exp(2J/T) / T`.
pub fn susceptibility_zero_field(coupling: f64, temperature: f64) -> f64 {
    (2.0 * coupling / temperature).exp() / temperature
}
