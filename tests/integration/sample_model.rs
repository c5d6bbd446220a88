//! A household with a utility function and an increasing vector of
//! thresholds, each keeping plain fields next to its registry.

use modelparams_rs::{
    BoundedVector, ModelObject, ModelParamsError, ObjectId, ParamRegistry, Parameter, Result,
};

pub struct Utility {
    pub pvector: ParamRegistry,
    pub sigma: f64,
    pub theta: Vec<f64>,
}

impl Utility {
    pub fn new(id: ObjectId) -> Self {
        let mut pvector = ParamRegistry::new(id);
        pvector
            .append(
                Parameter::scalar("sigma", 2.0)
                    .with_description("Curvature")
                    .with_symbol("σ")
                    .with_bounds(1.0, 5.0)
                    .unwrap()
                    .with_calibration(true)
                    .unwrap(),
            )
            .unwrap();
        pvector
            .append(
                Parameter::new("theta", vec![0.5, 1.5])
                    .with_description("Weights")
                    .with_bounds(0.0, 2.0)
                    .unwrap()
                    .with_element_calibration(vec![false, true])
                    .unwrap(),
            )
            .unwrap();
        Self {
            pvector,
            sigma: 2.0,
            theta: vec![0.5, 1.5],
        }
    }
}

impl ModelObject for Utility {
    fn pvector(&self) -> &ParamRegistry {
        &self.pvector
    }

    fn pvector_mut(&mut self) -> &mut ParamRegistry {
        &mut self.pvector
    }

    fn sync_param(&mut self, name: &str, index: usize, value: f64) -> Result<()> {
        match name {
            "sigma" => self.sigma = value,
            "theta" => self.theta[index] = value,
            _ => {
                return Err(ModelParamsError::NotFound {
                    name: name.to_string(),
                    owner: self.pvector.owner().clone(),
                })
            }
        }
        Ok(())
    }
}

pub struct Household {
    pub pvector: ParamRegistry,
    pub beta: f64,
    pub r: f64,
    pub utility: Utility,
    pub thresholds: BoundedVector,
}

impl Household {
    pub fn new() -> Self {
        let id = ObjectId::new("household");
        let mut pvector = ParamRegistry::new(id.clone());
        pvector
            .append(
                Parameter::scalar("beta", 0.95)
                    .with_description("Discount factor")
                    .with_symbol("β")
                    .with_bounds(0.8, 0.99)
                    .unwrap()
                    .with_calibration(true)
                    .unwrap(),
            )
            .unwrap();
        pvector
            .append(Parameter::scalar("r", 0.04).with_description("Interest rate"))
            .unwrap();

        Self {
            pvector,
            beta: 0.95,
            r: 0.04,
            utility: Utility::new(id.child("utility")),
            thresholds: BoundedVector::increasing(id.child("thresholds"), 0.0, 1.0, 4).unwrap(),
        }
    }

    pub fn utility_id() -> ObjectId {
        ObjectId::new("household").child("utility")
    }

    pub fn thresholds_id() -> ObjectId {
        ObjectId::new("household").child("thresholds")
    }
}

impl ModelObject for Household {
    fn pvector(&self) -> &ParamRegistry {
        &self.pvector
    }

    fn pvector_mut(&mut self) -> &mut ParamRegistry {
        &mut self.pvector
    }

    fn children(&self) -> Vec<&dyn ModelObject> {
        vec![&self.utility as &dyn ModelObject, &self.thresholds]
    }

    fn children_mut(&mut self) -> Vec<&mut dyn ModelObject> {
        vec![&mut self.utility as &mut dyn ModelObject, &mut self.thresholds]
    }

    fn sync_param(&mut self, name: &str, _index: usize, value: f64) -> Result<()> {
        match name {
            "beta" => self.beta = value,
            "r" => self.r = value,
            _ => {
                return Err(ModelParamsError::NotFound {
                    name: name.to_string(),
                    owner: self.pvector.owner().clone(),
                })
            }
        }
        Ok(())
    }
}
