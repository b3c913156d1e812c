//! The purchase-interstitial flow: one candidate purchase, one rhetorical
//! prompt, three ways out.

use rand::Rng;

use crate::data::format_rupees;

// Unit prices for the cost comparison, in whole rupees.
pub const HOURLY_WAGE: u32 = 500;
pub const COFFEE_PRICE: u32 = 200;
pub const RIDE_PRICE: u32 = 300;

/// Balance quoted by one of the conscience prompts. Sample data.
pub const SAMPLE_BANK_BALANCE: u32 = 12_450;

/// The purchase the overlay intercepts. Fixed for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseCandidate {
    pub name: &'static str,
    pub price: u32,
    pub site: &'static str,
    pub image_url: &'static str,
}

pub const SAMPLE_CANDIDATE: PurchaseCandidate = PurchaseCandidate {
    name: "Wireless Noise-Cancelling Headphones",
    price: 8_999,
    site: "Amazon",
    image_url: "https://images.pexels.com/photos/3394650/pexels-photo-3394650.jpeg",
};

/// What the candidate price buys instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostBreakdown {
    pub work_hours: u32,
    pub coffees: u32,
    pub rides: u32,
}

impl CostBreakdown {
    /// Hours round up (a started hour is worked); coffees and rides round
    /// down (you can't buy half a ride).
    pub fn for_price(price: u32) -> Self {
        Self {
            work_hours: price.div_ceil(HOURLY_WAGE),
            coffees: price / COFFEE_PRICE,
            rides: price / RIDE_PRICE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Skip,
    Consult,
    Proceed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStep {
    Prompt,
    Result,
}

/// The four rhetorical prompts the overlay picks from.
pub fn conscience_prompts(breakdown: &CostBreakdown) -> [String; 4] {
    [
        "Are you buying this because you're bored or because you actually need it?".to_string(),
        "You already have 3 pairs of headphones. What makes this one special?".to_string(),
        format!(
            "This costs {} hours of work. Still feeling it?",
            breakdown.work_hours
        ),
        format!(
            "Your bank balance is ₹{}. You sure about this purchase?",
            format_rupees(SAMPLE_BANK_BALANCE)
        ),
    ]
}

/// One run of the interstitial. Starts at [`FlowStep::Prompt`]; any of the
/// three decisions moves it to [`FlowStep::Result`] exactly once. There is
/// no way back to the prompt; dismissal drops the flow entirely.
#[derive(Debug)]
pub struct InterventionFlow {
    pub candidate: PurchaseCandidate,
    pub prompt: String,
    pub step: FlowStep,
    pub decision: Option<Decision>,
}

impl InterventionFlow {
    pub fn begin(rng: &mut impl Rng) -> Self {
        let candidate = SAMPLE_CANDIDATE;
        let prompts = conscience_prompts(&CostBreakdown::for_price(candidate.price));
        let prompt = prompts[rng.random_range(0..prompts.len())].clone();
        Self {
            candidate,
            prompt,
            step: FlowStep::Prompt,
            decision: None,
        }
    }

    pub fn breakdown(&self) -> CostBreakdown {
        CostBreakdown::for_price(self.candidate.price)
    }

    /// Records the decision and moves to the result step. Ignored once the
    /// flow has already reached a result.
    pub fn decide(&mut self, decision: Decision) {
        if self.step != FlowStep::Prompt {
            return;
        }
        self.step = FlowStep::Result;
        self.decision = Some(decision);
        tracing::info!(?decision, item = self.candidate.name, "intervention decision recorded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn breakdown_for_sample_candidate() {
        let breakdown = CostBreakdown::for_price(8_999);
        assert_eq!(breakdown.work_hours, 18);
        assert_eq!(breakdown.coffees, 44);
        assert_eq!(breakdown.rides, 29);
    }

    #[test]
    fn work_hours_round_up() {
        assert_eq!(CostBreakdown::for_price(500).work_hours, 1);
        assert_eq!(CostBreakdown::for_price(501).work_hours, 2);
        assert_eq!(CostBreakdown::for_price(499).work_hours, 1);
    }

    #[test]
    fn flow_starts_at_prompt_with_no_decision() {
        let mut rng = StdRng::seed_from_u64(7);
        let flow = InterventionFlow::begin(&mut rng);
        assert_eq!(flow.step, FlowStep::Prompt);
        assert_eq!(flow.decision, None);
    }

    #[test]
    fn each_decision_reaches_result_exactly_once() {
        for decision in [Decision::Skip, Decision::Consult, Decision::Proceed] {
            let mut rng = StdRng::seed_from_u64(7);
            let mut flow = InterventionFlow::begin(&mut rng);
            flow.decide(decision);
            assert_eq!(flow.step, FlowStep::Result);
            assert_eq!(flow.decision, Some(decision));
        }
    }

    #[test]
    fn later_decisions_are_ignored() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut flow = InterventionFlow::begin(&mut rng);
        flow.decide(Decision::Skip);
        flow.decide(Decision::Proceed);
        assert_eq!(flow.step, FlowStep::Result);
        assert_eq!(flow.decision, Some(Decision::Skip));
    }

    #[test]
    fn chosen_prompt_is_from_the_fixed_set() {
        let prompts = conscience_prompts(&CostBreakdown::for_price(SAMPLE_CANDIDATE.price));
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let flow = InterventionFlow::begin(&mut rng);
            assert!(prompts.contains(&flow.prompt));
        }
    }
}
